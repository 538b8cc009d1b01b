use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::track::{self, Track};

use super::m3u;
use super::order::SortCriterion;
use super::view::project;

/// An ordered track collection with a search/sort view and a cursor.
///
/// `current` is an index into the view (filtered + sorted), not into the raw
/// collection. The view is recomputed on every access.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
    search: Option<String>,
    sort: SortCriterion,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    /// Load a playlist from an M3U file. Entries that cannot be turned into a
    /// track are returned alongside the playlist instead of aborting the load.
    pub fn from_m3u(path: &Path) -> Result<(Self, Vec<Error>)> {
        let mut playlist = Self::new();
        let skipped = playlist.load_m3u(path)?;
        Ok((playlist, skipped))
    }

    pub fn add(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the first track equal to `track`. Returns whether one was found.
    pub fn remove(&mut self, track: &Track) -> bool {
        let Some(i) = self.tracks.iter().position(|t| t == track) else {
            return false;
        };
        self.tracks.remove(i);
        self.revalidate_cursor();
        true
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The raw collection in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> SortCriterion {
        self.sort
    }

    /// The cursor, relative to the view.
    pub fn current_index(&self) -> usize {
        self.current
    }

    fn view_indices(&self) -> Vec<usize> {
        project(&self.tracks, self.search.as_deref(), self.sort)
    }

    /// The filtered, sorted sequence the rest of the program observes.
    pub fn view(&self) -> Vec<&Track> {
        self.view_indices()
            .into_iter()
            .map(|i| &self.tracks[i])
            .collect()
    }

    pub fn view_len(&self) -> usize {
        self.view_indices().len()
    }

    pub fn current_track(&self) -> Option<&Track> {
        let view = self.view_indices();
        if view.is_empty() {
            return None;
        }
        Some(&self.tracks[view[self.current % view.len()]])
    }

    /// Move the cursor one step forward in the view, wrapping at the end.
    pub fn advance(&mut self) {
        let len = self.view_len();
        self.current = if len == 0 { 0 } else { (self.current + 1) % len };
    }

    /// Set the search text (trimmed) and keep the cursor on the same track if
    /// it is still visible, otherwise on the first one.
    pub fn set_search(&mut self, text: &str) {
        let anchor = self.current_track().cloned();
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self.reanchor(anchor.as_ref());
    }

    /// Change the sort criterion, re-anchoring the cursor like `set_search`.
    pub fn set_sort(&mut self, sort: SortCriterion) {
        let anchor = self.current_track().cloned();
        self.sort = sort;
        self.reanchor(anchor.as_ref());
    }

    /// Point the cursor at `track` if the view contains it.
    pub fn jump_to(&mut self, track: &Track) -> bool {
        match self.view().iter().position(|t| *t == track) {
            Some(i) => {
                self.current = i;
                true
            }
            None => false,
        }
    }

    /// Set the cursor, bounds-checked against the raw collection.
    ///
    /// The stored value is still read as a view index, so with an active
    /// search it may point past the view; reads wrap it modulo the view length.
    /// Prefer `set_current_in_view`.
    pub fn set_current_raw(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Set the cursor, bounds-checked against the current view.
    pub fn set_current_in_view(&mut self, index: usize) -> bool {
        if index < self.view_len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Replace the contents with the entries of an M3U file.
    ///
    /// A missing or unreadable file is an error and leaves the playlist
    /// untouched. Entries that fail to load are logged, skipped and returned.
    pub fn load_m3u(&mut self, path: &Path) -> Result<Vec<Error>> {
        let entries = m3u::read_entries(path)?;

        self.tracks.clear();
        self.current = 0;

        let mut skipped = Vec::new();
        for entry in entries {
            match track::from_path(&entry) {
                Ok(track) => self.tracks.push(track),
                Err(e) => {
                    warn!(entry = %entry, error = %e, "skipping playlist entry");
                    skipped.push(e);
                }
            }
        }
        debug!(path = %path.display(), loaded = self.tracks.len(), skipped = skipped.len(), "loaded playlist");
        Ok(skipped)
    }

    /// Write every track path, in insertion order, to an M3U file.
    pub fn save_m3u(&self, path: &Path) -> Result<()> {
        m3u::write_entries(path, self.tracks.iter().map(Track::path))
    }

    fn reanchor(&mut self, anchor: Option<&Track>) {
        self.current = match anchor {
            Some(track) => self.view().iter().position(|t| *t == track).unwrap_or(0),
            None => 0,
        };
    }

    fn revalidate_cursor(&mut self) {
        let len = self.view_len();
        if len == 0 {
            self.current = 0;
        } else if self.current >= len {
            self.current %= len;
        }
    }
}
