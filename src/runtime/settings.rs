use crate::config::{self, CatalogKind};

/// Load the settings, falling back to defaults. The second value carries a
/// warning to log once logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (
                    config::Settings::default(),
                    Some(format!("invalid config, using defaults: {msg}")),
                )
            } else {
                (s, None)
            }
        }
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

/// Point the catalog at a server URL or a local directory given on the command line.
pub fn apply_target(settings: &mut config::Settings, target: &str) {
    let target = target.trim();
    if target.starts_with("http://") || target.starts_with("https://") {
        settings.catalog.source = CatalogKind::Server;
        settings.server.base_url = target.to_string();
    } else {
        settings.catalog.source = CatalogKind::Directory;
        settings.catalog.directory = Some(target.to_string());
    }
}
