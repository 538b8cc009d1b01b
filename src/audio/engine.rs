use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::error::{Error, Result};

/// Something that can play one audio file at a time.
///
/// Implementations are shared between the UI thread and the playback workers,
/// so every method takes `&self`.
pub trait PlaybackEngine: Send + Sync + 'static {
    /// Begin playing `path`, replacing whatever was active. Returns at once;
    /// the handle resolves when the track ends, is stopped or fails to open.
    fn start(&self, path: &Path) -> PlayHandle;

    /// Play `path` and block until it finishes or is stopped.
    ///
    /// While paused this keeps blocking until resume or stop.
    fn play(&self, path: &Path) -> Result<()> {
        self.start(path).wait()
    }

    /// Pause if playing, resume if paused.
    fn toggle_pause(&self);

    /// Stop the active track and resolve its handle with `Ok(())`.
    fn stop(&self);

    /// Playback position of the active track.
    fn position(&self) -> Duration;
}

/// Completion of one `PlaybackEngine::start`.
///
/// The engine keeps the sending half and reports every end through it, `Ok`
/// included. A sender dropped without a value means the engine went away.
#[derive(Debug)]
pub struct PlayHandle {
    rx: Receiver<Result<()>>,
}

impl PlayHandle {
    pub fn channel() -> (Sender<Result<()>>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Block until the track is done. Fails with `EngineGone` when the engine
    /// dropped the track without an answer.
    pub fn wait(self) -> Result<()> {
        self.rx.recv().unwrap_or(Err(Error::EngineGone))
    }
}
