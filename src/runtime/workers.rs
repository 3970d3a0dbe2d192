//! Background jobs. Each runs on its own thread and posts exactly one
//! completion event.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, info, warn};

use crate::catalog::CatalogSource;
use crate::client::{ApiClient, EditRequest, UploadCandidate, upload_batch};
use crate::config::{ServerSettings, UploadSettings};
use crate::events::AppEvent;
use crate::transport::{CoverLoader, CoverTicket};

/// Preloads covers by probing their URLs off the UI thread.
pub struct CoverWorker {
    client: ApiClient,
    events: Sender<AppEvent>,
}

impl CoverWorker {
    pub fn new(client: ApiClient, events: Sender<AppEvent>) -> Self {
        Self { client, events }
    }
}

impl CoverLoader for CoverWorker {
    fn preload(&mut self, ticket: CoverTicket, url: &str) {
        let client = self.client.clone();
        let events = self.events.clone();
        let url = url.to_string();
        thread::spawn(move || {
            let ok = match client.probe_image(&url) {
                Ok(()) => true,
                Err(e) => {
                    debug!(%url, error = %e, "cover probe failed");
                    false
                }
            };
            let _ = events.send(AppEvent::CoverLoaded { ticket, ok });
        });
    }
}

/// Log in when credentials are configured, then fetch the catalog. With
/// `register` the account is created first.
pub fn spawn_startup(
    client: ApiClient,
    server: &ServerSettings,
    register: bool,
    catalog: Arc<dyn CatalogSource>,
    events: Sender<AppEvent>,
) {
    let credentials = server.username.clone().zip(server.password.clone());
    if register && credentials.is_none() {
        warn!("--register needs server.username and server.password");
    }
    thread::spawn(move || {
        if let Some((username, password)) = credentials {
            if register {
                match client.register(&username, &password) {
                    Ok(()) => info!(%username, "account created"),
                    Err(e) => warn!(%username, error = %e, "registration failed"),
                }
            }
            match client.login(&username, &password) {
                Ok(()) => info!(%username, "logged in"),
                Err(e) => warn!(%username, error = %e, "login failed"),
            }
        }
        let _ = events.send(AppEvent::CatalogLoaded(catalog.fetch()));
    });
}

pub fn spawn_catalog_fetch(catalog: Arc<dyn CatalogSource>, events: Sender<AppEvent>) {
    thread::spawn(move || {
        debug!(source = %catalog.describe(), "fetching catalog");
        let _ = events.send(AppEvent::CatalogLoaded(catalog.fetch()));
    });
}

pub fn spawn_upload(
    client: ApiClient,
    upload_path: String,
    settings: UploadSettings,
    batch: Vec<UploadCandidate>,
    events: Sender<AppEvent>,
) {
    thread::spawn(move || {
        info!(files = batch.len(), "uploading");
        let result = upload_batch(&client, &upload_path, &settings, batch);
        let _ = events.send(AppEvent::UploadFinished(result));
    });
}

pub fn spawn_delete(client: ApiClient, file: String, events: Sender<AppEvent>) {
    thread::spawn(move || {
        let result = client.delete_track(&file);
        let _ = events.send(AppEvent::DeleteFinished { file, result });
    });
}

pub fn spawn_edit(client: ApiClient, request: EditRequest, events: Sender<AppEvent>) {
    thread::spawn(move || {
        let result = client.edit_metadata(&request);
        let _ = events.send(AppEvent::EditFinished { request, result });
    });
}
