use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::PlaybackEngine;
use crate::playback::{PlaybackCoordinator, PlaybackState, PlayerEvent, lock_playlist};
use crate::track::Track;
use crate::ui;

/// Main terminal event loop: folds coordinator updates into `app`, draws,
/// and maps keys to playlist and playback operations. Returns `Ok(())` when
/// the user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    coordinator: &mut PlaybackCoordinator<E>,
    events: &Receiver<PlayerEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut track_changed = false;
        while let Ok(ev) = events.try_recv() {
            track_changed |= app.apply_event(ev);
        }
        app.playback = coordinator.state();

        let (view, sort, search) = {
            let pl = lock_playlist(coordinator.playlist());
            let view: Vec<Track> = pl.view().into_iter().cloned().collect();
            // Selection follows playback when a new track starts.
            if track_changed && app.now_playing.is_some() && !view.is_empty() {
                app.selected = pl.current_index() % view.len();
            }
            (view, pl.sort(), pl.search().map(str::to_string))
        };
        app.clamp(view.len());

        terminal.draw(|f| ui::draw(f, app, &view, sort, search.as_deref()))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, coordinator, &view) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the user asked to quit.
///
/// The playlist lock is never held across a coordinator call: stopping joins
/// workers that take the same lock.
fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    app: &mut App,
    coordinator: &mut PlaybackCoordinator<E>,
    view: &[Track],
) -> bool {
    let playlist = coordinator.playlist().clone();

    if app.search_mode {
        match key.code {
            KeyCode::Esc => {
                app.cancel_search();
                let mut pl = lock_playlist(&playlist);
                pl.set_search("");
                app.selected = pl.current_index();
            }
            KeyCode::Enter => {
                let text = app.finish_search();
                let mut pl = lock_playlist(&playlist);
                pl.set_search(&text);
                app.selected = pl.current_index();
            }
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => {
            let current = lock_playlist(&playlist).search().map(str::to_string);
            app.enter_search_mode(current.as_deref());
        }
        KeyCode::Char('s') => {
            let mut pl = lock_playlist(&playlist);
            let sort = pl.sort().next();
            pl.set_sort(sort);
            app.selected = pl.current_index();
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(view.len()),
        KeyCode::Char('k') | KeyCode::Up => app.prev(view.len()),
        KeyCode::Char('g') | KeyCode::Home => app.top(),
        KeyCode::Char('G') | KeyCode::End => app.bottom(view.len()),
        KeyCode::Enter => {
            if view.is_empty() {
                return false;
            }
            coordinator.stop();
            let moved = lock_playlist(&playlist).set_current_in_view(app.selected);
            if moved {
                coordinator.play();
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => match coordinator.state() {
            PlaybackState::Playing => coordinator.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => coordinator.play(),
        },
        KeyCode::Char('x') => coordinator.stop(),
        KeyCode::Char('n') => coordinator.next(),
        KeyCode::Char('d') => {
            let Some(track) = view.get(app.selected).cloned() else {
                return false;
            };
            if app.now_playing.as_ref() == Some(&track) {
                coordinator.stop();
            }
            if lock_playlist(&playlist).remove(&track) {
                app.set_status(format!("removed {}", track.filename()));
            }
        }
        KeyCode::Char('w') => save(app, coordinator),
        _ => {}
    }

    false
}

fn save<E: PlaybackEngine>(app: &mut App, coordinator: &PlaybackCoordinator<E>) {
    let Some(path) = app.save_path.clone() else {
        app.set_status("no playlist file to save to");
        return;
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(error = %e, "cannot create playlist directory");
    }

    match lock_playlist(coordinator.playlist()).save_m3u(&path) {
        Ok(()) => {
            info!(path = %path.display(), "saved playlist");
            app.set_status(format!("saved {}", path.display()));
        }
        Err(e) => {
            warn!(error = %e, "saving playlist failed");
            app.set_status(e.to_string());
        }
    }
}
