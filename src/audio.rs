//! Playback engine: the contract the coordinator drives, and a `rodio`
//! implementation running on its own command thread.

mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::{PlayHandle, PlaybackEngine};
pub use player::AudioPlayer;
pub use types::{EngineCmd, PlaybackHandle, PlaybackInfo};
