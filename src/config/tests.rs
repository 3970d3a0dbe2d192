use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_spindle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", "/tmp/spindle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/spindle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("spindle")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_server_limits() {
    let s = Settings::default();
    assert_eq!(s.upload.max_file_mb, 50);
    assert_eq!(s.upload.max_file_bytes(), 50 * 1024 * 1024);
    assert_eq!(s.player.volume, 100);
    assert_eq!(s.player.default_cover, "/static/img/default_cover.png");
    assert!(s.catalog.is_remote());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_catalog_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://music.local:8080"
upload_path = "/upload"
username = "ana"
password = "secret"

[catalog]
source = "dir"
directory = "/srv/music"
extensions = ["mp3", "ogg"]
recursive = false

[upload]
max_file_mb = 20

[player]
volume = 40
seek_step_seconds = 5
default_cover = "/img/none.png"

[ui]
header_text = "hello"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SPINDLE__PLAYER__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://music.local:8080");
    assert_eq!(s.server.upload_path, "/upload");
    assert_eq!(s.server.username.as_deref(), Some("ana"));
    assert_eq!(s.server.password.as_deref(), Some("secret"));
    assert_eq!(s.catalog.source, CatalogKind::Directory);
    assert_eq!(s.catalog.directory.as_deref(), Some("/srv/music"));
    assert_eq!(s.catalog.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(!s.catalog.recursive);
    assert!(s.catalog.follow_links);
    assert_eq!(s.upload.max_file_mb, 20);
    assert_eq!(s.player.volume, 40);
    assert_eq!(s.player.seek_step_seconds, 5);
    assert_eq!(s.player.default_cover, "/img/none.png");
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPINDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SPINDLE__PLAYER__VOLUME", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.volume, 15);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.upload.max_file_mb = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.server.base_url = "not a url".into();
    assert!(s.validate().is_err());
}

#[test]
fn to_toml_renders_effective_sections() {
    let mut s = Settings::default();
    s.player.volume = 70;
    let text = s.to_toml().unwrap();
    assert!(text.contains("[player]"));
    assert!(text.contains("volume = 70"));
}
