use crate::transport::{Toggle, TransportSnapshot};

use super::compact::CompactBar;
use super::expanded::ExpandedView;

/// The part both surfaces show identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub toggle: Toggle,
    /// 0-100.
    pub volume: u8,
}

impl From<&TransportSnapshot> for NowPlaying {
    fn from(s: &TransportSnapshot) -> Self {
        Self {
            title: s.title.clone(),
            artist: s.artist.clone(),
            cover: s.cover.clone(),
            toggle: s.toggle,
            volume: s.volume,
        }
    }
}

/// Both surfaces, always written together from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DualViewSync {
    pub compact: CompactBar,
    pub expanded: ExpandedView,
}

impl DualViewSync {
    pub fn sync(&mut self, snapshot: &TransportSnapshot) {
        let now_playing = NowPlaying::from(snapshot);
        self.compact.update(snapshot, now_playing.clone());
        self.expanded.update(snapshot, now_playing);
    }

    /// Whether the two surfaces agree on what is playing.
    pub fn in_sync(&self) -> bool {
        self.compact.now_playing == self.expanded.now_playing
    }
}
