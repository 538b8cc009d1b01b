use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::PoisonError;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::error::{Error, NotPlayableReason, Result};

use super::sink::create_sink;
use super::types::{EngineCmd, PlaybackHandle, PlaybackInfo};

/// The track currently owned by the engine thread.
struct Active {
    sink: Sink,
    done: Sender<Result<()>>,
    paused: bool,
}

impl Active {
    /// Stop the sink and release whoever waits on it.
    fn finish(self) {
        self.sink.stop();
        let _ = self.done.send(Ok(()));
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<EngineCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which
                // would scribble over the TUI.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                warn!(error = %e, "no audio output device, every track will fail");
                Err(e.to_string())
            }
        };

        let poll = Duration::from_millis(audio_settings.poll_ms.max(1));
        let mut active: Option<Active> = None;

        loop {
            match rx.recv_timeout(poll) {
                Ok(EngineCmd::Play { path, done }) => {
                    if let Some(prev) = active.take() {
                        prev.finish();
                    }
                    update_info(&playback_info, |info| info.clear());
                    active = open(&stream, path.clone(), done);
                    if active.is_some() {
                        debug!(path = %path.display(), "playing");
                        update_info(&playback_info, |info| info.begin(path));
                    }
                }
                Ok(EngineCmd::TogglePause) => {
                    if let Some(a) = active.as_mut() {
                        if a.paused {
                            a.sink.play();
                            update_info(&playback_info, |info| info.resume());
                        } else {
                            a.sink.pause();
                            update_info(&playback_info, |info| info.pause());
                        }
                        a.paused = !a.paused;
                    }
                }
                Ok(EngineCmd::Stop) => {
                    if let Some(a) = active.take() {
                        a.finish();
                    }
                    update_info(&playback_info, |info| info.clear());
                }
                Ok(EngineCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    if let Some(a) = active.take() {
                        a.finish();
                    }
                    update_info(&playback_info, |info| info.clear());
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for end of track
                    if active.as_ref().is_some_and(|a| !a.paused && a.sink.empty()) {
                        if let Some(a) = active.take() {
                            a.finish();
                        }
                        update_info(&playback_info, |info| info.clear());
                    }
                }
            }
        }
    })
}

fn update_info(playback_info: &PlaybackHandle, f: impl FnOnce(&mut PlaybackInfo)) {
    let mut info = playback_info
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut info);
}

/// Open `path` on the output stream. Failures are reported through `done`.
fn open(
    stream: &std::result::Result<OutputStream, String>,
    path: PathBuf,
    done: Sender<Result<()>>,
) -> Option<Active> {
    let sink = match stream {
        Ok(stream) => create_sink(stream, &path),
        Err(reason) => Err(Error::not_playable(
            path.display().to_string(),
            NotPlayableReason::Output(reason.clone()),
        )),
    };

    match sink {
        Ok(sink) => Some(Active {
            sink,
            done,
            paused: false,
        }),
        Err(e) => {
            let _ = done.send(Err(e));
            None
        }
    }
}
