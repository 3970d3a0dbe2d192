use super::model::{CatalogEntry, TrackDescriptor, UNKNOWN_ARTIST, UNTITLED};

const UPLOADS_PREFIX: &str = "/uploads/";

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// Source URL the server serves an uploaded file from.
pub fn upload_src(file: &str) -> String {
    format!("{UPLOADS_PREFIX}{}", urlencoding::encode(file))
}

/// Recover the file identifier from an `/uploads/<name>` source URL.
///
/// Returns an empty string when the URL has no uploads segment or does not decode.
pub fn file_id_from_src(src: &str) -> String {
    let Some((_, tail)) = src.split_once(UPLOADS_PREFIX) else {
        return String::new();
    };
    let tail = tail.split(['?', '#']).next().unwrap_or_default();
    urlencoding::decode(tail)
        .map(|s| s.into_owned())
        .unwrap_or_default()
}

/// Build the ordered playlist from catalog entries.
///
/// Order is preserved; missing titles, artists and covers take placeholder values.
pub fn build_playlist(entries: &[CatalogEntry], default_cover: &str) -> Vec<TrackDescriptor> {
    entries
        .iter()
        .map(|entry| {
            let src = non_blank(entry.src.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| upload_src(&entry.file));
            let file = if entry.file.trim().is_empty() {
                file_id_from_src(&src)
            } else {
                entry.file.clone()
            };

            TrackDescriptor {
                title: non_blank(entry.title.as_deref())
                    .unwrap_or(UNTITLED)
                    .to_string(),
                artist: non_blank(entry.artist.as_deref())
                    .unwrap_or(UNKNOWN_ARTIST)
                    .to_string(),
                cover: non_blank(entry.cover.as_deref())
                    .unwrap_or(default_cover)
                    .to_string(),
                src,
                file,
            }
        })
        .collect()
}
