use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::PlaybackEngine;
use crate::error::Error;

use super::types::{PlayerEvent, SharedPlaylist, lock_playlist};

#[derive(Debug, Default)]
struct Flags {
    paused: bool,
    terminated: bool,
}

/// Pause/terminate flags shared by the coordinator and its workers.
#[derive(Debug, Default)]
pub(super) struct Control {
    flags: Mutex<Flags>,
    wake: Condvar,
}

impl Control {
    fn flags(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the pause flag. `on_change` runs under the flag lock, only when the
    /// flag actually flips, so no track can start in between.
    pub(super) fn pause_with(&self, on_change: impl FnOnce()) -> bool {
        let mut flags = self.flags();
        if flags.paused {
            return false;
        }
        flags.paused = true;
        on_change();
        true
    }

    /// Clear the pause flag and wake the advancer. See `pause_with`.
    pub(super) fn resume_with(&self, on_change: impl FnOnce()) -> bool {
        let mut flags = self.flags();
        if !flags.paused {
            return false;
        }
        flags.paused = false;
        on_change();
        self.wake.notify_all();
        true
    }

    pub(super) fn terminate(&self) {
        self.flags().terminated = true;
        self.wake.notify_all();
    }

    pub(super) fn is_paused(&self) -> bool {
        self.flags().paused
    }

    pub(super) fn is_terminated(&self) -> bool {
        self.flags().terminated
    }

    /// Block while paused. Returns `false` once terminated.
    fn wait_while_paused(&self) -> bool {
        let flags = self
            .wake
            .wait_while(self.flags(), |f| f.paused && !f.terminated)
            .unwrap_or_else(PoisonError::into_inner);
        !flags.terminated
    }
}

/// Play the current track, advance, repeat.
///
/// Exits when terminated, when the view is empty, when the engine is gone, or
/// after every track of the view failed in a row.
pub(super) fn run_advancer<E: PlaybackEngine>(
    playlist: SharedPlaylist,
    engine: Arc<E>,
    control: Arc<Control>,
    events: Sender<PlayerEvent>,
) {
    let mut failures = 0usize;

    while control.wait_while_paused() {
        let Some(track) = lock_playlist(&playlist).current_track().cloned() else {
            debug!("nothing to play, advancer exits");
            break;
        };

        let handle = {
            let flags = control.flags();
            if flags.terminated {
                break;
            }
            if flags.paused {
                continue;
            }
            let _ = events.send(PlayerEvent::TrackChanged(Some(track.clone())));
            engine.start(Path::new(track.path()))
        };

        match handle.wait() {
            Ok(()) => failures = 0,
            Err(Error::EngineGone) => {
                if !control.is_terminated() {
                    warn!(path = track.path(), "playback engine is gone, advancer exits");
                }
                break;
            }
            Err(e) => {
                warn!(path = track.path(), error = %e, "skipping track");
                let _ = events.send(failure_event(track.path(), &e));
                failures += 1;
            }
        }

        if control.is_terminated() {
            break;
        }

        let mut pl = lock_playlist(&playlist);
        if failures > 0 && failures >= pl.view_len() {
            warn!(failures, "no playable track in view, advancer exits");
            break;
        }
        pl.advance();
    }

    // Exited on its own: take the timer down too.
    if !control.is_terminated() {
        control.terminate();
        let _ = events.send(PlayerEvent::TrackChanged(None));
    }
}

fn failure_event(path: &str, e: &Error) -> PlayerEvent {
    let reason = match e {
        Error::NotPlayable { reason, .. } => reason.to_string(),
        other => other.to_string(),
    };
    PlayerEvent::PlaybackFailed {
        path: e.path().unwrap_or_else(|| path.to_string()),
        reason,
    }
}

/// Report the engine position every `tick` until told to stop. Ticks without
/// a current track are skipped.
pub(super) fn run_timer<E: PlaybackEngine>(
    playlist: SharedPlaylist,
    engine: Arc<E>,
    control: Arc<Control>,
    tick: Duration,
    stop: Receiver<()>,
    events: Sender<PlayerEvent>,
) {
    loop {
        match stop.recv_timeout(tick) {
            Err(RecvTimeoutError::Timeout) => {
                if control.is_terminated() {
                    break;
                }
                if lock_playlist(&playlist).current_track().is_none() {
                    continue;
                }
                if events
                    .send(PlayerEvent::PositionTick(engine.position()))
                    .is_err()
                {
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
