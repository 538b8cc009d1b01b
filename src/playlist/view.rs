//! Filter + sort projection over the raw track list.
//!
//! The projection is a list of raw indices, recomputed from scratch on every
//! call. Nothing here holds state between calls.

use crate::track::Track;

use super::order::SortCriterion;

/// True when `needle_lower` occurs in the lowercase author, title or (tagged
/// tracks only) album of `track`.
pub fn matches(track: &Track, needle_lower: &str) -> bool {
    track.author().to_lowercase().contains(needle_lower)
        || track.title().to_lowercase().contains(needle_lower)
        || track
            .album()
            .is_some_and(|album| album.to_lowercase().contains(needle_lower))
}

/// Return the raw indices of `tracks` that pass `search`, ordered by `order`.
///
/// An empty or absent search keeps every track. `SortCriterion::Default` keeps
/// insertion order; other criteria use a stable sort.
pub fn project(tracks: &[Track], search: Option<&str>, order: SortCriterion) -> Vec<usize> {
    let mut indices: Vec<usize> = match search.filter(|s| !s.is_empty()) {
        None => (0..tracks.len()).collect(),
        Some(search) => {
            let needle = search.to_lowercase();
            (0..tracks.len())
                .filter(|&i| matches(&tracks[i], &needle))
                .collect()
        }
    };

    if order != SortCriterion::Default {
        indices.sort_by(|&a, &b| order.compare(&tracks[a], &tracks[b]));
    }
    indices
}
