//! Error types shared by the track, playlist and playback layers.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A track could not be built or played. Carries the offending path.
    #[error("cannot play {path}: {reason}")]
    NotPlayable {
        path: String,
        reason: NotPlayableReason,
    },

    /// An ordering was asked to compare against a missing track.
    #[error("invalid comparison: {0}")]
    InvalidComparison(&'static str),

    /// The playlist file itself is missing or unreadable/unwritable.
    #[error("playlist file {}: {source}", path.display())]
    PlaylistFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine dropped a track without reporting how it ended.
    #[error("playback engine is no longer running")]
    EngineGone,
    /// A time value does not fit the `mm:ss` format (>= 100 minutes).
    #[error("time value {0:?} overflows the mm:ss format")]
    TimeOverflow(Duration),
}

#[derive(Debug, Error)]
pub enum NotPlayableReason {
    #[error("unsupported format")]
    UnsupportedFormat,
    #[error("file not found")]
    NotFound,
    #[error("cannot read tags: {0}")]
    Tags(String),
    #[error("cannot read wav parameters: {0}")]
    WavParams(String),
    #[error("cannot decode: {0}")]
    Decode(String),
    #[error("audio output unavailable: {0}")]
    Output(String),
}

impl Error {
    pub fn not_playable(path: impl Into<String>, reason: NotPlayableReason) -> Self {
        Self::NotPlayable {
            path: path.into(),
            reason,
        }
    }

    /// The path this error is about, when there is one.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::NotPlayable { path, .. } => Some(path.clone()),
            Self::PlaylistFile { path, .. } => Some(path.display().to_string()),
            Self::InvalidComparison(_) | Self::EngineGone | Self::TimeOverflow(_) => None,
        }
    }
}
