//! tapedeck: a terminal playlist player.
//!
//! The playlist keeps a raw track collection plus a live search/sort view and
//! a cursor into that view; the playback coordinator plays the view's tracks
//! one after another on a `PlaybackEngine`.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod playlist;
pub mod runtime;
pub mod track;
pub mod ui;
