//! Everything that can wake the main loop besides terminal input.

use crate::catalog::{CatalogEntry, CatalogError};
use crate::client::{
    ClientError, DeleteResponse, EditRequest, EditResponse, UploadError, UploadOutcome,
};
use crate::transport::{CoverTicket, MediaEvent};

#[derive(Debug)]
pub enum AppEvent {
    /// Callback from the audio thread.
    Media(MediaEvent),
    /// A cover preload finished; `ok` is false when the image did not load.
    CoverLoaded { ticket: CoverTicket, ok: bool },
    CatalogLoaded(Result<Vec<CatalogEntry>, CatalogError>),
    UploadFinished(Result<UploadOutcome, UploadError>),
    DeleteFinished {
        file: String,
        result: Result<DeleteResponse, ClientError>,
    },
    EditFinished {
        request: EditRequest,
        result: Result<EditResponse, ClientError>,
    },
}
