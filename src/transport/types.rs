//! Seams and small types shared by the transport and its media backends.

use std::time::Duration;

/// Identifies one loaded source. Every `set_source` call yields a new id.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// Identifies one cover preload request.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CoverTicket(pub u64);

/// What the play/pause affordance currently offers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Toggle {
    /// Playback is stopped or paused; pressing starts it.
    #[default]
    Play,
    /// Playback is running; pressing pauses it.
    Pause,
}

impl Toggle {
    pub fn glyph(self) -> &'static str {
        match self {
            Toggle::Play => "►",
            Toggle::Pause => "❚❚",
        }
    }
}

/// Callbacks from the media backend, tagged with the source they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    MetadataLoaded { source: SourceId, duration: Duration },
    TimeUpdate { source: SourceId, position: Duration },
    Playing { source: SourceId },
    /// Playback could not start. Never surfaced to the user.
    PlayRejected { source: SourceId, reason: String },
    Paused { source: SourceId },
    Ended { source: SourceId },
}

impl MediaEvent {
    pub fn source(&self) -> SourceId {
        match self {
            MediaEvent::MetadataLoaded { source, .. }
            | MediaEvent::TimeUpdate { source, .. }
            | MediaEvent::Playing { source }
            | MediaEvent::PlayRejected { source, .. }
            | MediaEvent::Paused { source }
            | MediaEvent::Ended { source } => *source,
        }
    }
}

/// The single media session. Playback start is asynchronous: its outcome comes
/// back as `MediaEvent::Playing` or `MediaEvent::PlayRejected`.
pub trait MediaElement {
    /// Replace the current source. `None` unloads it.
    fn set_source(&mut self, src: Option<&str>) -> SourceId;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// Volume on the 0.0..=1.0 scale.
    fn set_volume(&mut self, volume: f32);
}

/// Loads a cover off-screen and reports back with the same ticket.
pub trait CoverLoader {
    fn preload(&mut self, ticket: CoverTicket, url: &str);
}

/// Everything the presentation surfaces need, taken in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSnapshot {
    pub has_source: bool,
    pub bar_visible: bool,
    pub index: Option<usize>,
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub toggle: Toggle,
    pub volume: u8,
}
