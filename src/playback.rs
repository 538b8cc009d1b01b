//! Playback coordination on top of a shared `Playlist`.
//!
//! `PlaybackCoordinator` runs two workers while playing: the advancer, which
//! plays the current track and moves the cursor on when it ends, and the
//! timer, which reports the engine position at a fixed interval. Everything
//! the front-end needs to know arrives as `PlayerEvent`s on one channel.

mod coordinator;
mod types;
mod workers;

pub use coordinator::PlaybackCoordinator;
pub use types::*;

#[cfg(test)]
mod tests;
