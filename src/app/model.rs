//! Application model: selection, search input and playback status.

use std::path::PathBuf;
use std::time::Duration;

use crate::playback::{PlaybackState, PlayerEvent};
use crate::track::Track;

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Selected position in the playlist view.
    pub selected: usize,
    pub playback: PlaybackState,
    pub now_playing: Option<Track>,
    pub position: Duration,

    pub search_mode: bool,
    pub search_input: String,

    /// Last message worth showing (skipped tracks, saves, load problems).
    pub status: Option<String>,
    /// Directory or playlist file the tracks came from.
    pub source: Option<String>,
    pub save_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one coordinator update into the model. Returns true when the
    /// playing track changed.
    pub fn apply_event(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::TrackChanged(track) => {
                self.position = Duration::ZERO;
                let changed = self.now_playing != track;
                self.now_playing = track;
                changed
            }
            PlayerEvent::PositionTick(pos) => {
                self.position = pos;
                false
            }
            PlayerEvent::PlaybackFailed { path, reason } => {
                self.status = Some(format!("skipped {path}: {reason}"));
                false
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Move the selection down, wrapping to the top.
    pub fn next(&mut self, view_len: usize) {
        if view_len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1) % view_len;
        }
    }

    /// Move the selection up, wrapping to the bottom.
    pub fn prev(&mut self, view_len: usize) {
        if view_len == 0 {
            self.selected = 0;
        } else if self.selected == 0 || self.selected >= view_len {
            self.selected = view_len - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn top(&mut self) {
        self.selected = 0;
    }

    pub fn bottom(&mut self, view_len: usize) {
        self.selected = view_len.saturating_sub(1);
    }

    /// Keep the selection inside a view that may have shrunk.
    pub fn clamp(&mut self, view_len: usize) {
        if self.selected >= view_len {
            self.selected = view_len.saturating_sub(1);
        }
    }

    /// Enter search mode, starting from the active search text.
    pub fn enter_search_mode(&mut self, current: Option<&str>) {
        self.search_mode = true;
        self.search_input = current.unwrap_or_default().to_string();
    }

    /// Leave search mode and hand back the text to apply.
    pub fn finish_search(&mut self) -> String {
        self.search_mode = false;
        std::mem::take(&mut self.search_input)
    }

    /// Leave search mode discarding the input.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }
}
