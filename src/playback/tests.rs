use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::audio::{PlayHandle, PlaybackEngine};
use crate::error::{Error, NotPlayableReason, Result};
use crate::playlist::Playlist;
use crate::track::Track;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Start(String),
    Toggle,
    Stop,
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    pending: Option<Sender<Result<()>>>,
    fail: HashSet<String>,
}

/// Engine double: records calls, keeps the current track "playing" until a
/// test finishes it or the coordinator stops it.
#[derive(Default)]
struct FakeEngine {
    inner: Mutex<Inner>,
}

impl FakeEngine {
    fn failing(paths: &[&str]) -> Self {
        let engine = Self::default();
        engine.inner.lock().unwrap().fail = paths.iter().map(|p| p.to_string()).collect();
        engine
    }

    fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn starts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Start(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn toggles(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Toggle).count()
    }

    /// End the active track normally.
    fn finish_current(&self) {
        wait_until(|| self.inner.lock().unwrap().pending.is_some());
        if let Some(done) = self.inner.lock().unwrap().pending.take() {
            let _ = done.send(Ok(()));
        }
    }

    fn wait_for_starts(&self, n: usize) {
        wait_until(|| self.starts().len() >= n);
    }
}

impl PlaybackEngine for FakeEngine {
    fn start(&self, path: &Path) -> PlayHandle {
        let path = path.to_string_lossy().into_owned();
        let (done, handle) = PlayHandle::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Start(path.clone()));
        if let Some(prev) = inner.pending.take() {
            let _ = prev.send(Ok(()));
        }
        if inner.fail.contains(&path) {
            let _ = done.send(Err(Error::not_playable(
                path,
                NotPlayableReason::Decode("fake decoder".into()),
            )));
        } else {
            inner.pending = Some(done);
        }
        handle
    }

    fn toggle_pause(&self) {
        self.inner.lock().unwrap().calls.push(Call::Toggle);
    }

    fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Stop);
        if let Some(done) = inner.pending.take() {
            let _ = done.send(Ok(()));
        }
    }

    fn position(&self) -> Duration {
        Duration::from_secs(42)
    }
}

fn wait_until(mut cond: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(Instant::now() < deadline, "timed out waiting for condition");
        thread::sleep(Duration::from_millis(2));
    }
}

const A: &str = "/m/Artist - A.mp3";
const B: &str = "/m/Artist - B.mp3";
const C: &str = "/m/Artist - C.mp3";

fn setup(
    paths: &[&str],
    engine: FakeEngine,
    tick: Duration,
) -> (
    PlaybackCoordinator<FakeEngine>,
    Arc<FakeEngine>,
    Receiver<PlayerEvent>,
) {
    let playlist = Playlist::from_tracks(paths.iter().map(|p| Track::plain(p)).collect());
    let engine = Arc::new(engine);
    let (coordinator, rx) =
        PlaybackCoordinator::new(Arc::new(Mutex::new(playlist)), engine.clone(), tick);
    (coordinator, engine, rx)
}

fn slow_tick() -> Duration {
    Duration::from_secs(60)
}

#[test]
fn play_with_empty_playlist_is_a_noop() {
    let (mut c, engine, rx) = setup(&[], FakeEngine::default(), slow_tick());
    c.play();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert!(engine.calls().is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn play_starts_current_track_and_announces_it() {
    let (mut c, engine, rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);

    engine.wait_for_starts(1);
    assert_eq!(engine.starts(), vec![A]);
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        PlayerEvent::TrackChanged(Some(Track::plain(A)))
    );
}

#[test]
fn finished_track_advances_and_wraps() {
    let (mut c, engine, _rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();

    engine.wait_for_starts(1);
    engine.finish_current();
    engine.wait_for_starts(2);
    assert_eq!(c.playlist().lock().unwrap().current_index(), 1);

    engine.finish_current();
    engine.wait_for_starts(3);
    assert_eq!(engine.starts(), vec![A, B, A]);
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn pause_from_stopped_does_nothing() {
    let (mut c, engine, _rx) = setup(&[A], FakeEngine::default(), slow_tick());
    c.pause();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(engine.toggles(), 0);
}

#[test]
fn repeated_pause_toggles_engine_once_and_play_resumes() {
    let (mut c, engine, _rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();
    engine.wait_for_starts(1);

    c.pause();
    c.pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(engine.toggles(), 1);

    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(engine.toggles(), 2);

    c.play();
    assert_eq!(engine.toggles(), 2);
}

#[test]
fn paused_between_tracks_holds_the_next_start() {
    let (mut c, engine, _rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();
    engine.wait_for_starts(1);

    c.pause();
    engine.finish_current();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(engine.starts(), vec![A]);

    c.play();
    engine.wait_for_starts(2);
    assert_eq!(engine.starts(), vec![A, B]);
}

#[test]
fn stop_from_paused_ends_with_track_cleared() {
    let (mut c, engine, rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();
    engine.wait_for_starts(1);
    c.pause();

    c.stop();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert!(engine.calls().contains(&Call::Stop));

    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    assert_eq!(events.first(), Some(&PlayerEvent::TrackChanged(Some(Track::plain(A)))));
    assert_eq!(events.last(), Some(&PlayerEvent::TrackChanged(None)));
    // Stopping does not move the cursor.
    assert_eq!(c.playlist().lock().unwrap().current_index(), 0);
}

#[test]
fn next_skips_to_following_track() {
    let (mut c, engine, _rx) = setup(&[A, B, C], FakeEngine::default(), slow_tick());
    c.play();
    engine.wait_for_starts(1);

    c.next();
    engine.wait_for_starts(2);
    assert_eq!(engine.starts(), vec![A, B]);
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.playlist().lock().unwrap().current_index(), 1);
}

#[test]
fn unplayable_track_is_reported_and_skipped() {
    let (mut c, engine, rx) = setup(&[A, B], FakeEngine::failing(&[A]), slow_tick());
    c.play();
    engine.wait_for_starts(2);
    assert_eq!(engine.starts(), vec![A, B]);

    c.stop();
    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::PlaybackFailed { path, .. } if path == A
    )));
    assert!(events.contains(&PlayerEvent::TrackChanged(Some(Track::plain(B)))));
}

#[test]
fn all_tracks_failing_stops_playback() {
    let (mut c, engine, rx) = setup(&[A, B], FakeEngine::failing(&[A, B]), slow_tick());
    c.play();
    wait_until(|| c.state() == PlaybackState::Stopped);
    assert_eq!(engine.starts(), vec![A, B]);

    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    let failures = events
        .iter()
        .filter(|e| matches!(e, PlayerEvent::PlaybackFailed { .. }))
        .count();
    assert_eq!(failures, 2);
    assert_eq!(events.last(), Some(&PlayerEvent::TrackChanged(None)));

    // A later play starts over.
    c.play();
    engine.wait_for_starts(3);
}

#[test]
fn timer_reports_engine_position() {
    let (mut c, _engine, rx) = setup(&[A], FakeEngine::default(), Duration::from_millis(20));
    c.play();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(left) {
            Ok(PlayerEvent::PositionTick(pos)) => {
                assert_eq!(pos, Duration::from_secs(42));
                break;
            }
            Ok(_) => continue,
            Err(e) => panic!("no position tick: {e}"),
        }
    }
}

#[test]
fn dropping_coordinator_joins_workers() {
    let (mut c, engine, rx) = setup(&[A], FakeEngine::default(), Duration::from_millis(5));
    c.play();
    engine.wait_for_starts(1);
    drop(c);

    // Both workers are gone, so the channel disconnects once drained.
    let deadline = Instant::now() + Duration::from_secs(5);
    while rx.recv_timeout(Duration::from_millis(50)).is_ok() {
        assert!(Instant::now() < deadline);
    }
    assert!(engine.calls().contains(&Call::Stop));
}

#[test]
fn play_resumes_even_when_search_hides_every_track() {
    let (mut c, engine, _rx) = setup(&[A, B], FakeEngine::default(), slow_tick());
    c.play();
    engine.wait_for_starts(1);
    c.pause();
    assert_eq!(engine.toggles(), 1);

    c.playlist().lock().unwrap().set_search("matches nothing");
    c.play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(engine.toggles(), 2);
}

/// Engine whose command thread is gone: every handle disconnects at once.
#[derive(Default)]
struct GoneEngine {
    starts: Mutex<usize>,
}

impl PlaybackEngine for GoneEngine {
    fn start(&self, _path: &Path) -> PlayHandle {
        *self.starts.lock().unwrap() += 1;
        let (_done, handle) = PlayHandle::channel();
        handle
    }

    fn toggle_pause(&self) {}

    fn stop(&self) {}

    fn position(&self) -> Duration {
        Duration::ZERO
    }
}

#[test]
fn vanished_engine_stops_the_advancer() {
    let playlist = Playlist::from_tracks(vec![Track::plain(A), Track::plain(B)]);
    let engine = Arc::new(GoneEngine::default());
    let (mut c, rx) =
        PlaybackCoordinator::new(Arc::new(Mutex::new(playlist)), engine.clone(), slow_tick());

    c.play();
    wait_until(|| c.state() == PlaybackState::Stopped);
    assert_eq!(*engine.starts.lock().unwrap(), 1);

    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            PlayerEvent::TrackChanged(Some(Track::plain(A))),
            PlayerEvent::TrackChanged(None),
        ]
    );
    // The cursor did not move past the track that never played.
    assert_eq!(c.playlist().lock().unwrap().current_index(), 0);
}
