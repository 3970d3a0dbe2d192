//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders the model with `ratatui` and records the screen regions the
//! mouse handler needs into `App::areas`.

use std::{collections::BTreeMap, sync::LazyLock};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, LineGauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, EditField, EditForm, HitAreas, Mode, RemoveCover};
use crate::catalog::{UNKNOWN_ARTIST, UNTITLED};
use crate::config::UiSettings;
use crate::views::{CompactBar, DualViewSync, ExpandedView};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    map.insert("H/L", "seek");
    map.insert("+/-", "volume");
    map.insert("e", "expanded");
    map.insert("u", "upload");
    map.insert("E", "edit");
    map.insert("d", "delete");
    map.insert("r", "reload");
    map.insert("q", "quit");
    map.insert("←/→", "seek");
    map.insert("esc", "close");
    map
});

/// Render the controls help text for the current mode.
fn controls_text(mode: Mode) -> String {
    let order: &[&str] = match mode {
        Mode::Expanded => &["space/p", "h/l", "←/→", "+/-", "esc", "q"],
        _ => &[
            "j/k", "h/l", "H/L", "enter", "space/p", "gg/G", "+/-", "e", "u", "E", "d", "r", "q",
        ],
    };
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into `frame`. `playing` is the playlist index of the loaded track.
pub fn draw(
    frame: &mut Frame,
    app: &mut App,
    views: &DualViewSync,
    playing: Option<usize>,
    ui_settings: &UiSettings,
) {
    let bar_height = if views.compact.visible { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(bar_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spindle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_status(frame, app, chunks[1]);

    let mut areas = HitAreas::default();
    if app.mode == Mode::Expanded {
        let body = Rect {
            height: chunks[2].height + chunks[3].height,
            ..chunks[2]
        };
        areas.progress_track = draw_expanded(frame, &views.expanded, body);
    } else {
        draw_track_list(frame, app, playing, chunks[2]);
        if views.compact.visible {
            draw_compact_bar(frame, &views.compact, chunks[3]);
            areas.compact_bar = chunks[3];
        }
    }
    app.areas = areas;

    let footer = Paragraph::new(controls_text(app.mode))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    let body = chunks[2];
    match app.mode {
        Mode::Upload => draw_upload(frame, &app.upload_input, body),
        Mode::Edit => {
            if let Some(form) = app.edit.as_ref() {
                draw_edit(frame, form, body);
            }
        }
        Mode::ConfirmDelete => draw_confirm_delete(frame, app.delete_target.as_deref(), body),
        Mode::Browse | Mode::Expanded => {}
    }

    if let Some(alert) = app.alert.as_deref() {
        let area = centered_rect_sized(60, 6, frame.area());
        frame.render_widget(Clear, area);
        let p = Paragraph::new(alert)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(" notice (any key) ")
                    .padding(left_pad()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(p, area);
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut parts: Vec<String> = vec![format!("Source: {}", app.source_label)];
    if app.loading {
        parts.push("Loading...".to_string());
    } else {
        parts.push(format!("{} tracks", app.cards.len()));
    }
    if let Some(label) = app.upload_label() {
        parts.push(label);
    }

    let status = Paragraph::new(parts.join(" • "))
        .block(Block::bordered().padding(left_pad()).title(" status "));
    frame.render_widget(status, area);
}

fn draw_track_list(frame: &mut Frame, app: &App, playing: Option<usize>, area: Rect) {
    // Center the selected item when possible; only build items for the visible window.
    let total = app.cards.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = app.selected.min(total.saturating_sub(1));
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let visible_items: Vec<ListItem> = app.cards[start..end]
        .iter()
        .enumerate()
        .map(|(offset, card)| {
            let marker = if playing == Some(start + offset) { "♪ " } else { "  " };
            let title = card.title.as_deref().unwrap_or(UNTITLED);
            let artist = card.artist.as_deref().unwrap_or(UNKNOWN_ARTIST);
            ListItem::new(format!("{marker}{title} · {artist}"))
        })
        .collect();

    let title = if app.loading && total == 0 {
        " tracks (loading) "
    } else {
        " tracks "
    };
    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_compact_bar(frame: &mut Frame, bar: &CompactBar, area: Rect) {
    let np = &bar.now_playing;
    let block = Block::bordered()
        .padding(left_pad())
        .title(format!(" now playing · vol {}% ", np.volume));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let line = Line::from(format!("{} {} · {}", np.toggle.glyph(), np.title, np.artist));
    frame.render_widget(Paragraph::new(line), rows[0]);

    let ratio = if bar.seek_max == 0 {
        0.0
    } else {
        (bar.seek_value as f64 / bar.seek_max as f64).clamp(0.0, 1.0)
    };
    let mut gauge = LineGauge::default()
        .ratio(ratio)
        .label(bar.time_label.clone());
    if !bar.controls_enabled {
        gauge = gauge.dim();
    }
    frame.render_widget(gauge, rows[1]);
}

/// Draws the full-screen player and returns the progress track area.
fn draw_expanded(frame: &mut Frame, view: &ExpandedView, area: Rect) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .padding(Padding::uniform(1))
        .title(" player (e/esc closes) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let np = &view.now_playing;
    frame.render_widget(
        Paragraph::new(np.title.as_str())
            .bold()
            .alignment(Alignment::Center),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(np.artist.as_str()).alignment(Alignment::Center),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(format!("cover: {}", np.cover))
            .dim()
            .alignment(Alignment::Center),
        rows[2],
    );

    let gauge = Gauge::default()
        .ratio(view.progress.clamp(0.0, 1.0))
        .label(format!("{} / {}", view.elapsed, view.total));
    frame.render_widget(gauge, rows[4]);

    frame.render_widget(
        Paragraph::new(format!(
            "{}   volume {}%",
            np.toggle.glyph(),
            np.volume
        ))
        .alignment(Alignment::Center),
        rows[6],
    );

    rows[4]
}

fn draw_upload(frame: &mut Frame, input: &str, area: Rect) {
    let popup = centered_rect_sized(72, 7, area);
    frame.render_widget(Clear, popup);
    let text = format!(
        "Files or folders to upload (quote paths with spaces):\n> {input}_\n\nenter uploads · esc cancels"
    );
    let p = Paragraph::new(text)
        .block(Block::bordered().title(" upload ").padding(left_pad()))
        .wrap(Wrap { trim: false });
    frame.render_widget(p, popup);
}

fn draw_edit(frame: &mut Frame, form: &EditForm, area: Rect) {
    let popup = centered_rect_sized(72, 12, area);
    frame.render_widget(Clear, popup);

    let field = |label: &str, value: &str, which: EditField| {
        let cursor = if form.focus == which { "_" } else { "" };
        let line = Line::from(format!("{label:<8}{value}{cursor}"));
        if form.focus == which {
            line.bold()
        } else {
            line
        }
    };
    let remove = match form.remove_cover {
        RemoveCover::Idle => "ctrl-r removes the cover".to_string(),
        RemoveCover::Armed => "Are you sure? Press ctrl-r again to confirm".to_string(),
        RemoveCover::Confirmed => "Cover will be removed".to_string(),
    };

    let mut lines = vec![
        Line::from(format!("file    {}", form.file)).dim(),
        field("title", &form.title, EditField::Title),
        field("artist", &form.artist, EditField::Artist),
        field("cover", &form.cover_path, EditField::Cover),
        Line::from(format!("current {}", form.current_cover)).dim(),
        Line::from(remove),
    ];
    if form.saving {
        lines.push(Line::from("Saving..."));
    }
    if let Some(err) = form.error.as_deref() {
        lines.push(Line::from(err.to_string()).red());
    }
    lines.push(Line::from("tab next field · enter saves · esc cancels").dim());

    let p = Paragraph::new(lines)
        .block(Block::bordered().title(" edit metadata ").padding(left_pad()))
        .wrap(Wrap { trim: false });
    frame.render_widget(p, popup);
}

fn draw_confirm_delete(frame: &mut Frame, target: Option<&str>, area: Rect) {
    let popup = centered_rect_sized(60, 7, area);
    frame.render_widget(Clear, popup);
    let text = match target {
        Some(file) => format!(
            "Delete {file}? This cannot be undone.\n\ny deletes · n/esc cancels"
        ),
        None => "Deleting...".to_string(),
    };
    let p = Paragraph::new(text)
        .block(Block::bordered().title(" confirm delete ").padding(left_pad()))
        .wrap(Wrap { trim: true });
    frame.render_widget(p, popup);
}
