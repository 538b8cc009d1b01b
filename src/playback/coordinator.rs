use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::audio::PlaybackEngine;

use super::types::{PlaybackState, PlayerEvent, SharedPlaylist, lock_playlist};
use super::workers::{run_advancer, run_timer, Control};

struct Workers {
    control: Arc<Control>,
    advancer: JoinHandle<()>,
    timer: JoinHandle<()>,
    timer_stop: Sender<()>,
}

/// Drives an engine through the tracks of a shared playlist.
///
/// Commands come from one thread (the UI); updates go out on the receiver
/// returned by `new`.
pub struct PlaybackCoordinator<E: PlaybackEngine> {
    playlist: SharedPlaylist,
    engine: Arc<E>,
    events: Sender<PlayerEvent>,
    tick: Duration,
    workers: Option<Workers>,
}

impl<E: PlaybackEngine> PlaybackCoordinator<E> {
    pub fn new(
        playlist: SharedPlaylist,
        engine: Arc<E>,
        tick: Duration,
    ) -> (Self, Receiver<PlayerEvent>) {
        let (events, rx) = mpsc::channel();
        let coordinator = Self {
            playlist,
            engine,
            events,
            tick,
            workers: None,
        };
        (coordinator, rx)
    }

    pub fn playlist(&self) -> &SharedPlaylist {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        match &self.workers {
            None => PlaybackState::Stopped,
            Some(w) if w.advancer.is_finished() => PlaybackState::Stopped,
            Some(w) if w.control.is_paused() => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    /// Start or resume playback. Starting does nothing without a current
    /// track; resuming always goes through.
    pub fn play(&mut self) {
        match self.state() {
            PlaybackState::Playing => {}
            PlaybackState::Paused => {
                if let Some(w) = &self.workers {
                    let engine = &self.engine;
                    w.control.resume_with(|| engine.toggle_pause());
                }
            }
            PlaybackState::Stopped => {
                if self.has_no_current_track() {
                    return;
                }
                // Reap workers that ended on their own.
                self.shutdown();
                self.spawn();
            }
        }
    }

    /// Pause; only meaningful while playing.
    pub fn pause(&mut self) {
        if self.state() != PlaybackState::Playing {
            return;
        }
        if let Some(w) = &self.workers {
            let engine = &self.engine;
            w.control.pause_with(|| engine.toggle_pause());
        }
    }

    /// Stop both workers, wait for them, and announce that nothing plays.
    pub fn stop(&mut self) {
        self.shutdown();
        self.engine.stop();
        let _ = self.events.send(PlayerEvent::TrackChanged(None));
    }

    /// Stop, move the cursor forward, play.
    pub fn next(&mut self) {
        self.stop();
        lock_playlist(&self.playlist).advance();
        self.play();
    }

    fn has_no_current_track(&self) -> bool {
        lock_playlist(&self.playlist).current_track().is_none()
    }

    fn spawn(&mut self) {
        let control = Arc::new(Control::default());
        let (timer_stop, stop_rx) = mpsc::channel();

        let advancer = {
            let playlist = self.playlist.clone();
            let engine = self.engine.clone();
            let control = control.clone();
            let events = self.events.clone();
            thread::spawn(move || run_advancer(playlist, engine, control, events))
        };

        let timer = {
            let playlist = self.playlist.clone();
            let engine = self.engine.clone();
            let control = control.clone();
            let events = self.events.clone();
            let tick = self.tick;
            thread::spawn(move || run_timer(playlist, engine, control, tick, stop_rx, events))
        };

        debug!("playback workers started");
        self.workers = Some(Workers {
            control,
            advancer,
            timer,
            timer_stop,
        });
    }

    fn shutdown(&mut self) {
        let Some(w) = self.workers.take() else {
            return;
        };
        w.control.terminate();
        // Releases an advancer blocked on the current track.
        self.engine.stop();
        let _ = w.timer_stop.send(());
        let _ = w.advancer.join();
        let _ = w.timer.join();
        debug!("playback workers joined");
    }
}

impl<E: PlaybackEngine> Drop for PlaybackCoordinator<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
