//! Suffix-based track construction backed by the tag and WAV readers.

use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::prelude::Accessor;

use crate::error::{Error, NotPlayableReason, Result};

use super::model::Track;
use super::parse::normalize_path;

/// Metadata read from an audio file's tags. `None` means the key was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

/// Frame count and frame rate from a WAV header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavParams {
    pub frames: u64,
    pub frame_rate: f64,
}

impl WavParams {
    /// `frames / frame_rate` seconds, at microsecond precision.
    pub fn duration(&self) -> Option<Duration> {
        if self.frame_rate.is_nan() || self.frame_rate <= 0.0 {
            return None;
        }
        let micros = (self.frames as f64 * 1_000_000.0 / self.frame_rate) as u64;
        Some(Duration::from_micros(micros))
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read title/artist/album tags and the stream duration with `lofty`.
pub fn read_tags(path: &Path) -> std::result::Result<TagInfo, String> {
    let tagged = lofty::read_from_path(path).map_err(|e| e.to_string())?;

    let mut info = TagInfo {
        duration: Some(tagged.properties().duration()),
        ..TagInfo::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        info.title = non_empty(tag.title().map(|v| v.into_owned()));
        info.author = non_empty(tag.artist().map(|v| v.into_owned()));
        info.album = non_empty(tag.album().map(|v| v.into_owned()));
    }

    Ok(info)
}

/// Read the frame count and sample rate of a WAV file with `hound`.
pub fn read_wav_params(path: &Path) -> std::result::Result<WavParams, String> {
    let reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
    Ok(WavParams {
        frames: u64::from(reader.duration()),
        frame_rate: f64::from(reader.spec().sample_rate),
    })
}

/// Build the right `Track` variant for `raw_path`, chosen by its extension
/// (case-insensitive): `wav` gives a WAV track, `ogg`/`mp3` a tagged track.
pub fn from_path(raw_path: &str) -> Result<Track> {
    let (path, _) = normalize_path(raw_path);
    let fail = |reason| Error::not_playable(path.clone(), reason);

    let ext = Path::new(&path)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "wav" | "ogg" | "mp3" => {}
        _ => return Err(fail(NotPlayableReason::UnsupportedFormat)),
    }
    if !Path::new(&path).is_file() {
        return Err(fail(NotPlayableReason::NotFound));
    }

    if ext == "wav" {
        let params =
            read_wav_params(Path::new(&path)).map_err(|e| fail(NotPlayableReason::WavParams(e)))?;
        let duration = params.duration().ok_or_else(|| {
            fail(NotPlayableReason::WavParams("frame rate is zero".to_string()))
        })?;
        Ok(Track::wav(&path, duration))
    } else {
        let tags = read_tags(Path::new(&path)).map_err(|e| fail(NotPlayableReason::Tags(e)))?;
        Ok(Track::tagged(&path, tags))
    }
}
