use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::playback::PlaybackCoordinator;

mod event_loop;
mod logging;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_notice) = settings::load_settings();
    let log_path = logging::init(&settings.log);
    if let Some(msg) = settings_notice {
        warn!("{msg}");
    }
    info!(log = ?log_path, "tapedeck starting");

    let arg = env::args().nth(1);
    let startup = startup::load_playlist(arg.as_deref(), &settings);

    let mut app = App::new();
    app.source = startup.source;
    app.save_path = startup.save_path;
    app.status = startup.status;

    let playlist = Arc::new(Mutex::new(startup.playlist));
    let engine = Arc::new(AudioPlayer::new(settings.audio.clone()));
    let (mut coordinator, events) = PlaybackCoordinator::new(
        playlist,
        engine.clone(),
        Duration::from_millis(settings.player.tick_ms),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut app, &mut coordinator, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    coordinator.stop();
    drop(coordinator);
    engine.quit();
    info!("tapedeck stopped");

    run_result
}
