//! Transport: the play/pause/seek/volume surface over the single media session.
//!
//! `TransportController` owns the playlist and the playback position and is
//! generic over the media backend and the cover loader so it can be driven
//! by the audio thread in the app and by fakes in tests.

mod controller;
mod time;
mod types;

pub use controller::TransportController;
pub use time::{clamp_position, format_time};
pub use types::*;
