//! HTTP client for the upload server: catalog listing, media fetches, upload,
//! delete and metadata edit.

mod error;
mod http;
mod types;
mod upload;

pub use error::ClientError;
pub use http::{ApiClient, Resource};
pub use types::*;
pub use upload::{
    UploadCandidate, UploadError, collect_candidates, split_paths, upload_batch, validate_batch,
};
