//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::playback::PlaybackState;
use crate::playlist::SortCriterion;
use crate::track::{Track, format_mmss};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("g/G", "top/bottom"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("x", "stop"),
    ("n", "next"),
    ("/", "search"),
    ("s", "sort"),
    ("d", "remove"),
    ("w", "save"),
    ("q", "quit"),
];

fn controls_text(app: &App) -> String {
    if app.search_mode {
        return "[enter] apply | [esc] clear search".to_string();
    }
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// `mm:ss`, or `--:--` past what the format can hold.
fn mmss_or_dashes(d: Duration) -> String {
    format_mmss(d).unwrap_or_else(|_| "--:--".to_string())
}

fn status_text(app: &App, sort: SortCriterion, search: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = match app.playback {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    };
    match &app.now_playing {
        Some(track) => {
            let mut time = mmss_or_dashes(app.position);
            if let Some(total) = track.duration() {
                time = format!("{time} / {}", mmss_or_dashes(total));
            }
            parts.push(format!("{state}: {} [{time}]", track.label()));
        }
        None => parts.push(state.to_string()),
    }

    parts.push(format!("SORT: {sort}"));

    if app.search_mode {
        parts.push(format!("SEARCH: {}_", app.search_input));
    } else if let Some(q) = search {
        parts.push(format!("SEARCH: {q}"));
    }

    if let Some(src) = &app.source {
        parts.push(format!("From: {src}"));
    }
    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Render the entire UI: header, status, the playlist view and the controls.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    view: &[Track],
    sort: SortCriterion,
    search: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(" ~ side A ~ ")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tapedeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, sort, search))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Only build ListItems for the visible window, keeping the selection centered.
    let total = view.len();
    let list_height = chunks[2].height.saturating_sub(2) as usize;
    let sel = app.selected.min(total.saturating_sub(1));
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let mut start = sel.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height)
    };

    let items: Vec<ListItem> = view[start..end]
        .iter()
        .map(|track| {
            let marker = if app.now_playing.as_ref() == Some(track) {
                "♪ "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{track}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    let footer = Paragraph::new(controls_text(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlong_times_render_as_dashes() {
        assert_eq!(mmss_or_dashes(Duration::from_secs(61)), "01:01");
        assert_eq!(mmss_or_dashes(Duration::from_secs(6000)), "--:--");
    }

    #[test]
    fn status_shows_track_time_sort_and_search() {
        let mut app = App::new();
        app.playback = PlaybackState::Playing;
        app.now_playing = Some(Track::wav("/m/Band - Song.wav", Duration::from_secs(90)));
        app.position = Duration::from_secs(5);

        let text = status_text(&app, SortCriterion::Author, Some("band"));
        assert!(text.contains("Playing: Band - Song [00:05 / 01:30]"));
        assert!(text.contains("SORT: author"));
        assert!(text.contains("SEARCH: band"));
    }

    #[test]
    fn controls_switch_in_search_mode() {
        let mut app = App::new();
        assert!(controls_text(&app).contains("[q] quit"));
        app.enter_search_mode(None);
        assert!(controls_text(&app).contains("[esc]"));
    }
}
