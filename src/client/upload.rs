//! Client-side upload validation and submission.
//!
//! A batch is all-or-nothing: one oversized file rejects every file in it, and
//! nothing reaches the network until the whole batch validates.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::UploadSettings;

use super::error::ClientError;
use super::http::ApiClient;
use super::types::UploadOutcome;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No files selected.")]
    NothingSelected,
    #[error("Only audio files (mp3) can be uploaded.")]
    NoAudio,
    #[error("File too large: {name} (max {limit_mb} MB)")]
    Oversized { name: String, limit_mb: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// A local file the user picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl UploadCandidate {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            mime,
        })
    }

    fn is_audio(&self, settings: &UploadSettings) -> bool {
        if self.mime.contains("audio") {
            return true;
        }
        let lower = self.name.to_ascii_lowercase();
        settings
            .audio_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .any(|e| lower.ends_with(&format!(".{e}")))
    }
}

/// Split an input line into paths. Double quotes group a path containing spaces.
pub fn split_paths(input: &str) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in input.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    out.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(PathBuf::from(current));
    }
    out
}

/// Turn the picked paths into candidates. Directories contribute every file under them.
pub fn collect_candidates(paths: &[PathBuf]) -> Result<Vec<UploadCandidate>, UploadError> {
    let mut out: Vec<UploadCandidate> = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut files: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect();
            files.sort();
            for file in files {
                out.push(UploadCandidate::from_path(&file)?);
            }
        } else {
            out.push(UploadCandidate::from_path(path)?);
        }
    }
    if out.is_empty() {
        return Err(UploadError::NothingSelected);
    }
    Ok(out)
}

/// Keep the audio files of a batch, rejecting the whole batch when any of them is too large.
pub fn validate_batch(
    candidates: Vec<UploadCandidate>,
    settings: &UploadSettings,
) -> Result<Vec<UploadCandidate>, UploadError> {
    if candidates.is_empty() {
        return Err(UploadError::NothingSelected);
    }

    let accepted: Vec<UploadCandidate> = candidates
        .into_iter()
        .filter(|c| c.is_audio(settings))
        .collect();
    if accepted.is_empty() {
        return Err(UploadError::NoAudio);
    }

    let limit = settings.max_file_bytes();
    if let Some(big) = accepted.iter().find(|c| c.size > limit) {
        return Err(UploadError::Oversized {
            name: big.name.clone(),
            limit_mb: settings.max_file_mb,
        });
    }

    Ok(accepted)
}

/// Validate then post the batch. No request is made for a batch that fails validation.
pub fn upload_batch(
    client: &ApiClient,
    upload_path: &str,
    settings: &UploadSettings,
    candidates: Vec<UploadCandidate>,
) -> Result<UploadOutcome, UploadError> {
    let batch = validate_batch(candidates, settings)?;
    Ok(client.upload(upload_path, &batch)?)
}
