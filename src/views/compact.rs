use crate::transport::{TransportSnapshot, format_time};

use super::sync::NowPlaying;

/// State of the persistent bar at the bottom of the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompactBar {
    pub now_playing: NowPlaying,
    /// Hidden until the first track is loaded.
    pub visible: bool,
    pub controls_enabled: bool,
    /// Whole seconds.
    pub seek_value: u64,
    pub seek_max: u64,
    pub time_label: String,
}

impl CompactBar {
    pub(super) fn update(&mut self, snapshot: &TransportSnapshot, now_playing: NowPlaying) {
        self.now_playing = now_playing;
        self.visible = snapshot.bar_visible;
        self.controls_enabled = snapshot.has_source;
        self.seek_value = snapshot.position.as_secs();
        self.seek_max = snapshot.duration.map(|d| d.as_secs()).unwrap_or(0);
        self.time_label = format!(
            "{} / {}",
            format_time(Some(snapshot.position)),
            format_time(snapshot.duration)
        );
    }
}
