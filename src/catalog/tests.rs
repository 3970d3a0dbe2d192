use std::fs;

use tempfile::tempdir;

use super::source::scan;
use super::*;
use crate::config::CatalogSettings;

const COVER: &str = "/static/img/default_cover.png";

fn entry(file: &str) -> CatalogEntry {
    CatalogEntry {
        file: file.into(),
        ..CatalogEntry::default()
    }
}

#[test]
fn build_playlist_keeps_order_and_applies_placeholders() {
    let entries = vec![
        CatalogEntry {
            file: "b.mp3".into(),
            title: Some("Bee".into()),
            artist: Some("Band".into()),
            cover: Some("/uploads/b.cover.jpg".into()),
            ..CatalogEntry::default()
        },
        entry("a.mp3"),
        CatalogEntry {
            file: "c.mp3".into(),
            title: Some("   ".into()),
            artist: Some("".into()),
            ..CatalogEntry::default()
        },
    ];

    let playlist = build_playlist(&entries, COVER);
    let files: Vec<&str> = playlist.iter().map(|t| t.file.as_str()).collect();
    assert_eq!(files, vec!["b.mp3", "a.mp3", "c.mp3"]);

    assert_eq!(playlist[0].title, "Bee");
    assert_eq!(playlist[0].artist, "Band");
    assert_eq!(playlist[0].cover, "/uploads/b.cover.jpg");

    assert_eq!(playlist[1].title, UNTITLED);
    assert_eq!(playlist[1].artist, UNKNOWN_ARTIST);
    assert_eq!(playlist[1].cover, COVER);
    assert_eq!(playlist[2].title, UNTITLED);
    assert_eq!(playlist[2].artist, UNKNOWN_ARTIST);
}

#[test]
fn build_playlist_of_nothing_is_empty() {
    assert!(build_playlist(&[], COVER).is_empty());
}

#[test]
fn source_defaults_to_encoded_upload_path() {
    let playlist = build_playlist(&[entry("ab12_My Song.mp3")], COVER);
    assert_eq!(playlist[0].src, "/uploads/ab12_My%20Song.mp3");
}

#[test]
fn file_identifier_is_recovered_from_source_when_missing() {
    let e = CatalogEntry {
        file: String::new(),
        src: Some("http://host/uploads/ab12_My%20Song.mp3?t=1".into()),
        ..CatalogEntry::default()
    };
    let playlist = build_playlist(&[e], COVER);
    assert_eq!(playlist[0].file, "ab12_My Song.mp3");
}

#[test]
fn file_id_from_src_without_uploads_segment_is_empty() {
    assert_eq!(file_id_from_src("/static/song.mp3"), "");
    assert_eq!(file_id_from_src("/uploads/x%2Fy.mp3"), "x/y.mp3");
}

#[test]
fn server_listing_decodes_into_entries() {
    let raw = r#"[{"file":"a.mp3","title":"A","artist":"X","cover":"/static/img/default_cover.png"}]"#;
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file, "a.mp3");
    assert_eq!(entries[0].src, None);
    assert_eq!(entries[0].title.as_deref(), Some("A"));
}

#[test]
fn scan_filters_extensions_and_sorts_by_file_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let entries = scan(dir.path(), &CatalogSettings::default());
    let files: Vec<&str> = entries.iter().map(|e| e.file.as_str()).collect();
    assert_eq!(files, vec!["A.mp3", "b.MP3"]);
    assert_eq!(entries[0].title.as_deref(), Some("A"));
    assert!(entries[0].src.as_deref().unwrap().starts_with("file://"));
    assert_eq!(entries[0].cover, None);
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = CatalogSettings {
        recursive: false,
        ..CatalogSettings::default()
    };
    let entries = scan(dir.path(), &settings);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file, "root.mp3");
}

#[test]
fn directory_catalog_reports_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let source = DirectoryCatalog::new(&missing, CatalogSettings::default());
    assert!(matches!(
        source.fetch(),
        Err(CatalogError::MissingDirectory(p)) if p == missing
    ));
}
