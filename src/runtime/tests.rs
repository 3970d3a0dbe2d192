use std::path::PathBuf;

use super::logging::log_dir;
use super::settings::apply_target;
use super::*;
use crate::config::LoggingSettings;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn cli_without_arguments_uses_the_config() {
    assert_eq!(Cli::parse(args(&[])), Cli::default());
}

#[test]
fn cli_takes_the_first_positional_as_target() {
    let cli = Cli::parse(args(&["--dump-config", "http://host:5000", "extra"]));
    assert!(cli.dump_config);
    assert_eq!(cli.target.as_deref(), Some("http://host:5000"));
}

#[test]
fn register_flag_is_not_taken_as_a_target() {
    let cli = Cli::parse(args(&["--register", "http://host:5000"]));
    assert!(cli.register);
    assert!(!cli.dump_config);
    assert_eq!(cli.target.as_deref(), Some("http://host:5000"));
}

#[test]
fn url_target_selects_the_server_catalog() {
    let mut settings = Settings::default();
    settings.catalog.source = CatalogKind::Directory;
    apply_target(&mut settings, "https://music.example");

    assert_eq!(settings.catalog.source, CatalogKind::Server);
    assert_eq!(settings.server.base_url, "https://music.example");
}

#[test]
fn path_target_selects_the_directory_catalog() {
    let mut settings = Settings::default();
    apply_target(&mut settings, "/srv/music");

    assert_eq!(settings.catalog.source, CatalogKind::Directory);
    assert_eq!(settings.catalog.directory.as_deref(), Some("/srv/music"));
    assert!(!settings.catalog.is_remote());
}

#[test]
fn configured_log_directory_wins() {
    let settings = LoggingSettings {
        directory: Some("/var/log/spindle".into()),
        ..LoggingSettings::default()
    };
    assert_eq!(log_dir(&settings), Some(PathBuf::from("/var/log/spindle")));
}

#[test]
fn directory_catalog_is_described_by_its_path() {
    let mut settings = Settings::default();
    apply_target(&mut settings, "/srv/music");
    let client = ApiClient::new(&settings.server).unwrap();
    assert_eq!(catalog_source(&settings, &client).describe(), "/srv/music");
}
