//! Commands understood by the audio thread and its error type.

use std::sync::Arc;
use std::time::Duration;

use crate::client::ClientError;
use crate::transport::SourceId;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Stream(String),
    #[error("could not decode audio: {0}")]
    Decode(String),
    #[error(transparent)]
    Fetch(#[from] ClientError),
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source. Bytes are fetched in the background.
    Load { source: SourceId, src: String },
    /// Posted by a loader thread when the bytes for `source` arrived (or did not).
    Loaded {
        source: SourceId,
        bytes: Result<Arc<[u8]>, AudioError>,
    },
    /// Drop the current source.
    Unload,
    Play,
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Volume on the 0.0..=1.0 scale.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
