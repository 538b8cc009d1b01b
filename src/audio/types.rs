//! Audio-related small types and handles.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::Result;

#[derive(Debug)]
pub enum EngineCmd {
    /// Start playing `path`; `done` resolves when it ends.
    Play {
        path: PathBuf,
        done: Sender<Result<()>>,
    },
    /// Toggle pause/resume.
    TogglePause,
    /// Stop playback immediately.
    Stop,
    /// Stop and leave the command loop.
    Quit,
}

/// Runtime playback information shared with callers of `position()`.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Path of the active track, if any.
    pub path: Option<PathBuf>,
    /// Set while the sink is running; `None` when paused or idle.
    pub started_at: Option<Instant>,
    /// Time played before the last pause.
    pub accumulated: Duration,
}

impl PlaybackInfo {
    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    pub(super) fn begin(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.started_at = Some(Instant::now());
        self.accumulated = Duration::ZERO;
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    pub(super) fn resume(&mut self) {
        if self.path.is_some() && self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
