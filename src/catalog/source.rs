use std::borrow::Cow;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::client::{ApiClient, ClientError};
use crate::config::CatalogSettings;

use super::model::CatalogEntry;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("catalog directory {0} does not exist")]
    MissingDirectory(PathBuf),
}

/// Something that can list the current catalog. Each fetch returns the full list.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
    fn describe(&self) -> String;
}

/// The server's `/api/musicas` listing.
pub struct ServerCatalog {
    client: ApiClient,
}

impl ServerCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl CatalogSource for ServerCatalog {
    fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.client.list_tracks()?)
    }

    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }
}

/// A local directory of audio files, read without any server.
pub struct DirectoryCatalog {
    root: PathBuf,
    settings: CatalogSettings,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>, settings: CatalogSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }
}

impl CatalogSource for DirectoryCatalog {
    fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        if !self.root.is_dir() {
            return Err(CatalogError::MissingDirectory(self.root.clone()));
        }
        Ok(scan(&self.root, &self.settings))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

fn is_track_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (None, None);
    };

    (clean_tag(tag.title()), clean_tag(tag.artist()))
}

fn clean_tag(v: Option<Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Walk `dir` and produce catalog entries with `file://` sources.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Vec<CatalogEntry> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    let mut entries: Vec<CatalogEntry> = Vec::new();
    for entry in walker.into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_file() || !is_track_file(path, settings) {
            continue;
        }

        let file = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let default_title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        let src = std::fs::canonicalize(path)
            .ok()
            .and_then(|abs| reqwest::Url::from_file_path(abs).ok())
            .map(|u| u.to_string());

        let (title, artist) = read_tags(path);
        entries.push(CatalogEntry {
            file,
            src,
            title: title.or(default_title),
            artist,
            cover: None,
        });
    }

    entries.sort_by(|a, b| a.file.to_lowercase().cmp(&b.file.to_lowercase()));
    entries
}
