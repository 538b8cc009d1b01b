//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model holds what the front-end shows besides the playlist
//! itself: the selection, search input and the last playback updates.

mod model;

pub use model::*;
