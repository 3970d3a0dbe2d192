//! `rodio` implementation of the media element.
//!
//! A dedicated thread owns the output stream and the sink. Sources are
//! fetched on short-lived loader threads and decoded from memory, so remote
//! and local tracks go through the same path.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, AudioError};

#[cfg(test)]
mod tests;
