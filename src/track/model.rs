use std::fmt;
use std::time::Duration;

use super::parse::{normalize_path, split_author_title};
use super::time::format_mmss;

/// Variant-specific data of a track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackKind {
    /// No audio properties known beyond the path.
    #[default]
    Plain,
    /// A sampled file with a known duration.
    Sampled { duration: Duration },
    /// A sampled file whose metadata came from its tags. `album` may be empty.
    Tagged { duration: Duration, album: String },
    /// A WAV file; duration comes from frame count and frame rate.
    Wav { duration: Duration },
}

/// A single audio item, identified by its normalized path.
///
/// `author`, `title` and `album` are never absent: missing values are empty
/// strings. `Track::default()` is the empty placeholder (empty path).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    path: String,
    filename: String,
    author: String,
    title: String,
    kind: TrackKind,
}

impl Track {
    /// Build a track of `kind` from a raw path, deriving author and title from
    /// the filename.
    pub fn new(raw_path: &str, kind: TrackKind) -> Self {
        let (path, filename) = normalize_path(raw_path);
        let (author, title) = split_author_title(&filename);
        Self {
            path,
            filename,
            author,
            title,
            kind,
        }
    }

    pub fn plain(raw_path: &str) -> Self {
        Self::new(raw_path, TrackKind::Plain)
    }

    pub fn sampled(raw_path: &str, duration: Duration) -> Self {
        Self::new(raw_path, TrackKind::Sampled { duration })
    }

    pub fn wav(raw_path: &str, duration: Duration) -> Self {
        Self::new(raw_path, TrackKind::Wav { duration })
    }

    /// Build a tagged track. Tag values replace the filename-derived ones; a
    /// missing title falls back to the filename without its extension, a
    /// missing author/album to empty.
    pub fn tagged(raw_path: &str, tags: super::TagInfo) -> Self {
        let mut track = Self::new(raw_path, TrackKind::Plain);
        let stem = match track.filename.rfind('.') {
            Some(i) => track.filename[..i].to_string(),
            None => track.filename.clone(),
        };
        track.title = tags.title.unwrap_or(stem).trim().to_string();
        track.author = tags.author.unwrap_or_default().trim().to_string();
        track.kind = TrackKind::Tagged {
            duration: tags.duration.unwrap_or_default(),
            album: tags.album.unwrap_or_default().trim().to_string(),
        };
        track
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &TrackKind {
        &self.kind
    }

    /// Album of a tagged track; `None` for every other variant.
    pub fn album(&self) -> Option<&str> {
        match &self.kind {
            TrackKind::Tagged { album, .. } => Some(album),
            _ => None,
        }
    }

    /// Duration of a sampled track; `None` for plain tracks.
    pub fn duration(&self) -> Option<Duration> {
        match self.kind {
            TrackKind::Plain => None,
            TrackKind::Sampled { duration }
            | TrackKind::Tagged { duration, .. }
            | TrackKind::Wav { duration } => Some(duration),
        }
    }

    /// `author - title`, or just the title when there is no author.
    pub fn label(&self) -> String {
        if self.author.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.author, self.title)
        }
    }

    /// True for the default-constructed placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())?;

        if let Some(album) = self.album().filter(|a| !a.is_empty()) {
            write!(f, " - {album}")?;
        }
        if let Some(d) = self.duration() {
            match format_mmss(d) {
                Ok(mmss) => write!(f, " - {mmss}")?,
                Err(_) => f.write_str(" - --:--")?,
            }
        }
        Ok(())
    }
}
