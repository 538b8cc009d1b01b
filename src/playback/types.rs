use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::playlist::Playlist;
use crate::track::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Updates sent from the playback workers to the front-end, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// A track started, or `None` when playback stopped.
    TrackChanged(Option<Track>),
    /// Position of the current track.
    PositionTick(Duration),
    /// A track could not be played and was skipped.
    PlaybackFailed { path: String, reason: String },
}

pub type SharedPlaylist = Arc<Mutex<Playlist>>;

/// Lock the shared playlist. A panic elsewhere does not make it unusable.
pub fn lock_playlist(playlist: &SharedPlaylist) -> MutexGuard<'_, Playlist> {
    playlist.lock().unwrap_or_else(PoisonError::into_inner)
}
