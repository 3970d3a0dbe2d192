use serde::Deserialize;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_ARTIST: &str = "Unknown";
pub const NO_TRACK_TITLE: &str = "No track";
pub const NO_TRACK_ARTIST: &str = "—";

/// A track card as the catalog source reports it. Every field but `file` may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub file: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
}

/// One playable entry of the playlist. Built in full from the catalog and never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub src: String,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub file: String,
}
