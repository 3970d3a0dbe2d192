//! Helpers for turning fetched bytes into a `rodio` sink.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

pub(super) type Bytes = Arc<[u8]>;

/// Create a paused `Sink` over `bytes` that starts playback at `start_at`.
///
/// Also returns the duration the decoder reports, when it knows one.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    bytes: &Bytes,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let decoder =
        Decoder::new(Cursor::new(bytes.clone())).map_err(|e| AudioError::Decode(e.to_string()))?;
    let duration = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.set_volume(volume);
    sink.pause();
    Ok((sink, duration))
}

/// Read the duration from the container headers. Used when the decoder cannot tell.
pub(super) fn probe_duration(bytes: &Bytes) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes.clone()))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}
