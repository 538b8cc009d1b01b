use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config;
use crate::library::scan;
use crate::playlist::Playlist;

/// The playlist to start with and where it came from.
pub struct Startup {
    pub playlist: Playlist,
    pub source: Option<String>,
    pub save_path: Option<PathBuf>,
    pub status: Option<String>,
}

/// Build the initial playlist from the command-line argument (a directory to
/// scan or an M3U file) or the configured default playlist.
pub fn load_playlist(arg: Option<&str>, settings: &config::Settings) -> Startup {
    let mut startup = match arg {
        Some(arg) if Path::new(arg).is_dir() => from_dir(Path::new(arg), settings),
        Some(arg) => from_m3u(Path::new(arg)),
        None => match settings.playlist.default_playlist.as_deref() {
            Some(path) if path.is_file() => from_m3u(path),
            _ => Startup {
                playlist: Playlist::new(),
                source: None,
                save_path: None,
                status: None,
            },
        },
    };

    if let Some(path) = &settings.playlist.save_path {
        startup.save_path = Some(path.clone());
    } else if startup.save_path.is_none() {
        startup.save_path = settings.playlist.default_playlist.clone();
    }

    startup.playlist.set_sort(settings.playlist.sort);
    startup.playlist.set_search(&settings.playlist.search);
    startup
}

fn from_dir(dir: &Path, settings: &config::Settings) -> Startup {
    let tracks = scan(dir, &settings.library);
    info!(dir = %dir.display(), tracks = tracks.len(), "scanned directory");
    Startup {
        status: Some(format!("{} tracks found", tracks.len())),
        playlist: Playlist::from_tracks(tracks),
        source: Some(dir.display().to_string()),
        save_path: None,
    }
}

fn from_m3u(path: &Path) -> Startup {
    match Playlist::from_m3u(path) {
        Ok((playlist, skipped)) => Startup {
            status: (!skipped.is_empty()).then(|| format!("{} entries skipped", skipped.len())),
            playlist,
            source: Some(path.display().to_string()),
            save_path: Some(path.to_path_buf()),
        },
        Err(e) => {
            warn!(error = %e, "starting with an empty playlist");
            Startup {
                playlist: Playlist::new(),
                source: None,
                save_path: Some(path.to_path_buf()),
                status: Some(e.to_string()),
            }
        }
    }
}
