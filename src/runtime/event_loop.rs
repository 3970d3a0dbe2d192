use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions;
use crate::app::{App, Mode};
use crate::audio::AudioPlayer;
use crate::catalog::CatalogSource;
use crate::client::{ApiClient, collect_candidates, split_paths, validate_batch};
use crate::config::Settings;
use crate::events::AppEvent;
use crate::transport::TransportController;
use crate::ui;

use super::workers::{self, CoverWorker};

pub type Transport = TransportController<AudioPlayer, CoverWorker>;

const VOLUME_STEP: i16 = 5;
const SERVER_ONLY: &str = "Only available with a server catalog.";

/// Long-lived handles the loop hands to background jobs.
pub struct Services {
    pub settings: Settings,
    pub client: ApiClient,
    pub catalog: Arc<dyn CatalogSource>,
    pub events: Sender<AppEvent>,
}

impl Services {
    fn remote(&self) -> bool {
        self.settings.catalog.is_remote()
    }

    fn default_cover(&self) -> &str {
        &self.settings.player.default_cover
    }

    fn seek_step(&self) -> f64 {
        self.settings.player.seek_step_seconds as f64
    }

    fn reload_catalog(&self, app: &mut App) {
        app.loading = true;
        workers::spawn_catalog_fetch(self.catalog.clone(), self.events.clone());
    }
}

/// State tracked by the event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: drains completions, draws, then handles input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    services: &Services,
    app: &mut App,
    transport: &mut Transport,
    events: &Receiver<AppEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();
    loop {
        while let Ok(event) = events.try_recv() {
            handle_app_event(event, services, app, transport);
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                transport.views(),
                transport.index(),
                &services.settings.ui,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, services, app, transport, &mut state) {
                        transport.media().quit_softly(Duration::from_millis(
                            services.settings.player.quit_fade_out_ms,
                        ));
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, transport),
                _ => {}
            }
        }
    }

    Ok(())
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

fn handle_app_event(event: AppEvent, services: &Services, app: &mut App, transport: &mut Transport) {
    let cover = services.default_cover();
    match event {
        AppEvent::Media(ev) => transport.handle_media_event(ev),
        AppEvent::CoverLoaded { ticket, ok } => transport.on_cover_loaded(ticket, ok),
        AppEvent::CatalogLoaded(result) => actions::catalog_loaded(app, transport, cover, result),
        AppEvent::UploadFinished(result) => {
            if actions::upload_finished(app, result) {
                services.reload_catalog(app);
            }
        }
        AppEvent::DeleteFinished { file, result } => {
            actions::delete_finished(app, transport, cover, &file, result)
        }
        AppEvent::EditFinished { request, result } => {
            actions::edit_finished(app, transport, cover, &request, result, now_millis())
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    services: &Services,
    app: &mut App,
    transport: &mut Transport,
    state: &mut EventLoopState,
) -> bool {
    if app.alert.is_some() {
        app.dismiss_alert();
        return false;
    }

    match app.mode {
        Mode::Upload => handle_upload_key(key, services, app),
        Mode::Edit => handle_edit_key(key, services, app),
        Mode::ConfirmDelete => handle_delete_key(key, services, app),
        Mode::Expanded => {
            let step = services.seek_step();
            match key.code {
                KeyCode::Esc | KeyCode::Char('e') => app.toggle_expanded(),
                KeyCode::Left => transport.seek_by(-step),
                KeyCode::Right => transport.seek_by(step),
                _ => return handle_transport_key(key, services, transport),
            }
        }
        Mode::Browse => return handle_browse_key(key, services, app, transport, state),
    }
    false
}

/// Keys shared by the track list and the expanded view.
fn handle_transport_key(key: KeyEvent, services: &Services, transport: &mut Transport) -> bool {
    let step = services.seek_step();
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => transport.toggle_play(),
        KeyCode::Char('l') => transport.play_next(),
        KeyCode::Char('h') => transport.play_previous(),
        KeyCode::Char('L') => transport.seek_by(step),
        KeyCode::Char('H') => transport.seek_by(-step),
        KeyCode::Char('+') | KeyCode::Char('=') => transport.change_volume(VOLUME_STEP),
        KeyCode::Char('-') => transport.change_volume(-VOLUME_STEP),
        _ => {}
    }
    false
}

fn handle_browse_key(
    key: KeyEvent,
    services: &Services,
    app: &mut App,
    transport: &mut Transport,
    state: &mut EventLoopState,
) -> bool {
    let pending_gg = std::mem::take(&mut state.pending_gg);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if pending_gg {
                app.selected = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.selected = app.cards.len().saturating_sub(1),
        KeyCode::Enter => {
            let already_playing = transport.has_source()
                && !transport.is_paused()
                && transport.index() == Some(app.selected);
            if app.has_cards() && !already_playing {
                transport.play_index(app.selected);
            }
        }
        KeyCode::Char('e') => app.toggle_expanded(),
        KeyCode::Char('r') => services.reload_catalog(app),
        KeyCode::Char('u') if app.upload_busy.is_none() => {
            if services.remote() {
                app.begin_upload();
            } else {
                app.show_alert(SERVER_ONLY);
            }
        }
        KeyCode::Char('E') => {
            if services.remote() {
                app.begin_edit(services.default_cover());
            } else {
                app.show_alert(SERVER_ONLY);
            }
        }
        KeyCode::Char('d') => {
            if services.remote() {
                app.begin_delete();
            } else {
                app.show_alert(SERVER_ONLY);
            }
        }
        _ => return handle_transport_key(key, services, transport),
    }
    false
}

fn handle_upload_key(key: KeyEvent, services: &Services, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Backspace => {
            app.upload_input.pop();
        }
        KeyCode::Enter => submit_upload(services, app),
        KeyCode::Char(c) if !c.is_control() => app.upload_input.push(c),
        _ => {}
    }
}

fn submit_upload(services: &Services, app: &mut App) {
    let paths = split_paths(&app.upload_input);
    app.close_modal();

    let batch = collect_candidates(&paths).and_then(|c| validate_batch(c, &services.settings.upload));
    match batch {
        Ok(batch) => {
            app.upload_busy = Some(batch.len());
            workers::spawn_upload(
                services.client.clone(),
                services.settings.server.upload_path.clone(),
                services.settings.upload.clone(),
                batch,
                services.events.clone(),
            );
        }
        Err(e) => app.show_alert(e.to_string()),
    }
}

fn handle_edit_key(key: KeyEvent, services: &Services, app: &mut App) {
    if key.code == KeyCode::Esc {
        app.close_modal();
        return;
    }
    let Some(form) = app.edit.as_mut() else {
        return;
    };
    if form.saving {
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.press_remove_cover()
        }
        KeyCode::Enter => match form.to_request() {
            Ok(request) => {
                form.error = None;
                form.saving = true;
                workers::spawn_edit(services.client.clone(), request, services.events.clone());
            }
            Err(msg) => form.error = Some(msg.to_string()),
        },
        KeyCode::Char(c) if !c.is_control() => form.push_char(c),
        _ => {}
    }
}

fn handle_delete_key(key: KeyEvent, services: &Services, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            // Taking the target turns the dialog into a progress message until the reply lands.
            if let Some(file) = app.delete_target.take() {
                workers::spawn_delete(services.client.clone(), file, services.events.clone());
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => app.close_modal(),
        _ => {}
    }
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut App, transport: &mut Transport) {
    let track = app.areas.progress_track;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.mode {
            Mode::Expanded => {
                if let Some(f) = app.drag.pointer_down(track, mouse.column, mouse.row) {
                    transport.seek_fraction(f);
                }
            }
            Mode::Browse => {
                let on_bar = app
                    .areas
                    .compact_bar
                    .contains(Position::new(mouse.column, mouse.row));
                if on_bar && transport.views().compact.visible {
                    app.toggle_expanded();
                }
            }
            _ => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(f) = app.drag.pointer_move(track, mouse.column) {
                transport.seek_fraction(f);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.drag.pointer_up(),
        _ => {}
    }
}
