use std::path::PathBuf;

use serde::Deserialize;

use crate::playlist::SortCriterion;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tapedeck/config.toml` or `~/.config/tapedeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAPEDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub player: PlayerSettings,
    pub playlist: PlaylistSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the engine thread checks whether the current track ended
    /// (milliseconds).
    pub poll_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { poll_ms: 200 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Interval between position updates while a track is current (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Playlist loaded at startup when no path is given on the command line.
    pub default_playlist: Option<PathBuf>,
    /// Where `w` writes the playlist. Falls back to the file it was loaded from,
    /// then to `default_playlist`.
    pub save_path: Option<PathBuf>,
    /// Initial sort criterion.
    pub sort: SortCriterion,
    /// Initial search text (empty = no filter).
    pub search: String,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            default_playlist: Some(PathBuf::from("playlists/DefaultPlayList.m3u")),
            save_path: None,
            sort: SortCriterion::Default,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "ogg".into(), "wav".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file. Defaults to `$XDG_STATE_HOME/tapedeck/tapedeck.log`.
    pub file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
