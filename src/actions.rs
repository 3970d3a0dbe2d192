//! Applying server responses to the UI model and the playlist.
//!
//! Every completion that changes the catalog ends with a playlist rebuild so
//! the transport never indexes into a stale list.

use tracing::{info, warn};

use crate::app::{App, Mode};
use crate::catalog::{CatalogEntry, CatalogError, build_playlist};
use crate::client::{
    ClientError, DeleteResponse, EditRequest, EditResponse, UploadError, UploadOutcome,
};
use crate::transport::{CoverLoader, MediaElement, TransportController};

pub const DELETE_FAILED: &str = "Could not delete the track.";
pub const EDIT_FAILED: &str = "Could not update metadata.";
pub const EDIT_UNREACHABLE: &str = "Could not save.";
pub const UPLOAD_FAILED: &str = "Upload failed.";

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

pub fn rebuild_playlist<M: MediaElement, C: CoverLoader>(
    app: &App,
    transport: &mut TransportController<M, C>,
    default_cover: &str,
) {
    transport.set_playlist(build_playlist(&app.cards, default_cover));
}

pub fn catalog_loaded<M: MediaElement, C: CoverLoader>(
    app: &mut App,
    transport: &mut TransportController<M, C>,
    default_cover: &str,
    result: Result<Vec<CatalogEntry>, CatalogError>,
) {
    match result {
        Ok(cards) => {
            info!(count = cards.len(), "catalog loaded");
            app.set_cards(cards);
            rebuild_playlist(app, transport, default_cover);
        }
        Err(e) => {
            warn!(error = %e, "catalog fetch failed");
            app.loading = false;
            app.show_alert(format!("Could not load the track list: {e}"));
        }
    }
}

pub fn delete_finished<M: MediaElement, C: CoverLoader>(
    app: &mut App,
    transport: &mut TransportController<M, C>,
    default_cover: &str,
    file: &str,
    result: Result<DeleteResponse, ClientError>,
) {
    if app.mode == Mode::ConfirmDelete {
        app.close_modal();
    }

    match result {
        Ok(res) if res.success => {
            info!(%file, "track deleted");
            app.remove_card(file);
            if transport.playing_file() == Some(file) {
                transport.stop();
            }
            rebuild_playlist(app, transport, default_cover);
        }
        Ok(res) => {
            app.show_alert(res.message.unwrap_or_else(|| DELETE_FAILED.to_string()));
        }
        Err(e) => {
            warn!(error = %e, %file, "delete request failed");
            app.show_alert(DELETE_FAILED);
        }
    }
}

/// `stamp` is appended to a new cover URL as `?t=<stamp>` so it is not served from cache.
pub fn edit_finished<M: MediaElement, C: CoverLoader>(
    app: &mut App,
    transport: &mut TransportController<M, C>,
    default_cover: &str,
    request: &EditRequest,
    result: Result<EditResponse, ClientError>,
    stamp: u128,
) {
    let res = match result {
        Ok(res) if res.ok => res,
        Ok(res) => {
            let message = res.error.unwrap_or_else(|| EDIT_FAILED.to_string());
            edit_error(app, &request.file, message);
            return;
        }
        Err(e) => {
            warn!(error = %e, file = %request.file, "edit request failed");
            edit_error(app, &request.file, EDIT_UNREACHABLE.to_string());
            return;
        }
    };

    let title = non_blank(res.title.as_deref()).or(request.title.as_deref());
    let artist = non_blank(res.artist.as_deref()).or(request.artist.as_deref());
    let cover = non_blank(res.cover.as_deref()).map(|c| format!("{c}?t={stamp}"));

    for card in app.cards.iter_mut().filter(|c| c.file == request.file) {
        if let Some(t) = title {
            card.title = Some(t.to_string());
        }
        if let Some(a) = artist {
            card.artist = Some(a.to_string());
        }
        if let Some(c) = &cover {
            card.cover = Some(c.clone());
        }
    }

    transport.apply_metadata_edit(
        &request.file,
        request.title.as_deref(),
        request.artist.as_deref(),
        cover.as_deref(),
    );
    info!(file = %request.file, "metadata updated");

    if app.mode == Mode::Edit && editing(app, &request.file) {
        app.close_modal();
    }
    rebuild_playlist(app, transport, default_cover);
}

/// True when the open edit form belongs to `file`.
fn editing(app: &App, file: &str) -> bool {
    app.edit.as_ref().is_some_and(|form| form.file == file)
}

/// A reply for a form that was closed or replaced goes to the alert line.
fn edit_error(app: &mut App, file: &str, message: String) {
    match app.edit.as_mut().filter(|form| form.file == file) {
        Some(form) => {
            form.saving = false;
            form.error = Some(message);
        }
        None => app.show_alert(message),
    }
}

/// Returns true when the catalog should be reloaded.
pub fn upload_finished(app: &mut App, result: Result<UploadOutcome, UploadError>) -> bool {
    app.upload_busy = None;
    match result {
        Ok(outcome) => {
            info!(?outcome, "upload finished");
            true
        }
        Err(e @ (UploadError::Client(_) | UploadError::Io(_))) => {
            warn!(error = %e, "upload failed");
            app.show_alert(UPLOAD_FAILED);
            false
        }
        Err(e) => {
            app.show_alert(e.to_string());
            false
        }
    }
}
