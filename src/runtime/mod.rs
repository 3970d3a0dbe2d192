use std::env;
use std::sync::Arc;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::catalog::{CatalogSource, DirectoryCatalog, ServerCatalog};
use crate::client::ApiClient;
use crate::config::{CatalogKind, Settings};
use crate::events::AppEvent;
use crate::transport::TransportController;

mod event_loop;
mod logging;
mod settings;
mod workers;

#[cfg(test)]
mod tests;

/// Command line: an optional server URL or directory, `--dump-config` and
/// `--register`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cli {
    pub target: Option<String>,
    pub dump_config: bool,
    /// Create the configured account before logging in.
    pub register: bool,
}

impl Cli {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut cli = Cli::default();
        for arg in args {
            match arg.as_str() {
                "--dump-config" => cli.dump_config = true,
                "--register" => cli.register = true,
                _ if cli.target.is_none() => cli.target = Some(arg),
                _ => {}
            }
        }
        cli
    }
}

fn catalog_source(settings: &Settings, client: &ApiClient) -> Arc<dyn CatalogSource> {
    match settings.catalog.source {
        CatalogKind::Server => Arc::new(ServerCatalog::new(client.clone())),
        CatalogKind::Directory => {
            let root = settings.catalog.directory.clone().unwrap_or_else(|| {
                env::current_dir()
                    .ok()
                    .and_then(|p| p.to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| ".".to_string())
            });
            Arc::new(DirectoryCatalog::new(root, settings.catalog.clone()))
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse(env::args().skip(1));
    let (mut settings, warning) = settings::load_settings();
    if let Some(target) = cli.target.as_deref() {
        settings::apply_target(&mut settings, target);
    }
    if cli.dump_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let _log_guard = logging::init(&settings.logging);
    if let Some(warning) = warning {
        warn!("{warning}");
    }

    let client = ApiClient::new(&settings.server)?;
    let catalog = catalog_source(&settings, &client);
    info!(source = %catalog.describe(), "starting");

    let (events_tx, events_rx) = mpsc::channel::<AppEvent>();
    let audio = AudioPlayer::new(client.clone(), events_tx.clone());
    let covers = workers::CoverWorker::new(client.clone(), events_tx.clone());
    let mut transport = TransportController::new(
        audio,
        covers,
        settings.player.default_cover.clone(),
        settings.player.volume,
    );
    let mut app = App::new(catalog.describe());

    workers::spawn_startup(
        client.clone(),
        &settings.server,
        cli.register,
        catalog.clone(),
        events_tx.clone(),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let services = event_loop::Services {
        settings,
        client,
        catalog,
        events: events_tx,
    };
    let run_result = event_loop::run(
        &mut terminal,
        &services,
        &mut app,
        &mut transport,
        &events_rx,
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    run_result
}
