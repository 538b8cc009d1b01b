//! Playlist module: the raw track collection, its search/sort view and the
//! playback cursor, plus M3U persistence.

mod m3u;
mod model;
mod order;
mod view;

pub use m3u::{read_entries, write_entries};
pub use model::*;
pub use order::SortCriterion;
pub use view::{matches, project};
