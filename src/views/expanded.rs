use ratatui::layout::{Position, Rect};

use crate::transport::{TransportSnapshot, format_time};

use super::sync::NowPlaying;

/// State of the full-screen player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpandedView {
    pub now_playing: NowPlaying,
    /// Fraction of the track played, `0.0..=1.0`.
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
}

impl ExpandedView {
    pub(super) fn update(&mut self, snapshot: &TransportSnapshot, now_playing: NowPlaying) {
        self.now_playing = now_playing;
        self.progress = match snapshot.duration {
            Some(d) if !d.is_zero() => {
                (snapshot.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        self.elapsed = format_time(Some(snapshot.position));
        self.total = format_time(snapshot.duration);
    }
}

/// Pointer-driven seeking on the expanded progress track.
///
/// Each method returns the fraction to seek to, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeekDrag {
    dragging: bool,
}

impl SeekDrag {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts a drag when the pointer lands on the track.
    pub fn pointer_down(&mut self, track: Rect, column: u16, row: u16) -> Option<f64> {
        if !track.contains(Position::new(column, row)) {
            return None;
        }
        self.dragging = true;
        Some(Self::fraction_at(track, column))
    }

    /// Follows the pointer anywhere on screen while a drag is active.
    pub fn pointer_move(&mut self, track: Rect, column: u16) -> Option<f64> {
        self.dragging.then(|| Self::fraction_at(track, column))
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Horizontal position over the track as a fraction, clamped to `0.0..=1.0`.
    pub fn fraction_at(track: Rect, column: u16) -> f64 {
        if track.width <= 1 {
            return 0.0;
        }
        let offset = f64::from(column) - f64::from(track.x);
        let span = f64::from(track.width - 1);
        (offset / span).clamp(0.0, 1.0)
    }
}
