use std::path::PathBuf;

use serde::Deserialize;

/// Body of `POST /delete/{file}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /edit_metadata`. The server leaves `ok` out on failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
    pub file: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Local image to send as the new cover.
    pub cover: Option<PathBuf>,
    pub remove_cover: bool,
}

impl EditRequest {
    /// True when the request carries at least one change.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.artist.is_some() || self.cover.is_some() || self.remove_cover
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server answered with a redirect to this URL.
    Redirected(String),
    Completed,
}
