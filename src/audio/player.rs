use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::engine::{PlayHandle, PlaybackEngine};
use super::thread::spawn_audio_thread;
use super::types::{EngineCmd, PlaybackHandle, PlaybackInfo};

/// `rodio`-backed engine. All device access happens on one command thread.
pub struct AudioPlayer {
    tx: Sender<EngineCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Stop playback and join the command thread. Safe to call twice.
    pub fn quit(&self) {
        let _ = self.tx.send(EngineCmd::Quit);

        let handle = self
            .join
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(h) = handle {
            let _ = h.join();
        }
    }
}

impl PlaybackEngine for AudioPlayer {
    fn start(&self, path: &Path) -> PlayHandle {
        let (done, handle) = PlayHandle::channel();
        // If the thread is gone the command (and `done`) is dropped, which
        // resolves the handle with `EngineGone`.
        let _ = self.tx.send(EngineCmd::Play {
            path: path.to_path_buf(),
            done,
        });
        handle
    }

    fn toggle_pause(&self) {
        let _ = self.tx.send(EngineCmd::TogglePause);
    }

    fn stop(&self) {
        let _ = self.tx.send(EngineCmd::Stop);
    }

    fn position(&self) -> Duration {
        self.playback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit();
    }
}
