use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spindle/config.toml` or `~/.config/spindle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPINDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub upload: UploadSettings,
    pub player: PlayerSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Root URL of the upload server. Relative track and cover URLs resolve against it.
    pub base_url: String,
    /// Path the upload form posts to.
    pub upload_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Optional credentials; when both are set the client logs in at start-up.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            upload_path: "/".to_string(),
            timeout_secs: 30,
            username: None,
            password: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    #[serde(alias = "remote", alias = "http")]
    Server,
    #[serde(alias = "dir", alias = "local")]
    Directory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Where the playlist comes from.
    pub source: CatalogKind,
    /// Directory scanned when `source = "directory"`.
    pub directory: Option<String>,
    /// File extensions to treat as tracks in directory mode (case-insensitive, without dot).
    pub extensions: Vec<String>,
    pub follow_links: bool,
    pub recursive: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: CatalogKind::Server,
            directory: None,
            extensions: vec!["mp3".into()],
            follow_links: true,
            recursive: true,
        }
    }
}

impl CatalogSettings {
    pub fn is_remote(&self) -> bool {
        self.source == CatalogKind::Server
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Any file above this size rejects the whole batch.
    pub max_file_mb: u64,
    /// Extensions accepted even when the guessed MIME type is not `audio/*`.
    pub audio_extensions: Vec<String>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_mb: 50,
            audio_extensions: vec!["mp3".into()],
        }
    }
}

impl UploadSettings {
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Initial volume, 0-100.
    pub volume: u8,
    /// Seconds skipped by the arrow keys in the expanded view.
    pub seek_step_seconds: u64,
    /// Cover shown when a track has none or its cover fails to load.
    pub default_cover: String,
    /// Fade-out duration when quitting (milliseconds). 0 stops immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 100,
            seek_step_seconds: 10,
            default_cover: "/static/img/default_cover.png".to_string(),
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ spindle ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `SPINDLE_LOG` is not set.
    pub level: String,
    /// Log directory. Defaults to `$XDG_STATE_HOME/spindle` or `~/.local/state/spindle`.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
