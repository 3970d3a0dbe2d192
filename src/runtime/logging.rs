use std::env;
use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

pub const LOG_ENV: &str = "SPINDLE_LOG";
const LOG_FILE: &str = "spindle.log";

/// Where log files go: the configured directory, else the XDG state directory.
pub fn log_dir(settings: &LoggingSettings) -> Option<PathBuf> {
    if let Some(dir) = settings.directory.as_deref().filter(|d| !d.trim().is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("spindle"));
    }
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".local/state/spindle"))
}

pub fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a daily-rolling file subscriber. The terminal belongs to the UI, so
/// nothing is logged to stderr. Keep the returned guard alive until exit.
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let dir = log_dir(settings)?;
    fs::create_dir_all(&dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .try_init()
        .ok()?;

    Some(guard)
}
