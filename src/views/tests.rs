use std::time::Duration;

use ratatui::layout::Rect;

use super::*;
use crate::transport::{Toggle, TransportSnapshot};

fn snapshot() -> TransportSnapshot {
    TransportSnapshot {
        has_source: true,
        bar_visible: true,
        index: Some(1),
        title: "Song".into(),
        artist: "Band".into(),
        cover: "/uploads/song.jpg".into(),
        position: Duration::from_secs(75),
        duration: Some(Duration::from_secs(200)),
        toggle: Toggle::Pause,
        volume: 40,
    }
}

#[test]
fn sync_writes_the_same_now_playing_to_both_surfaces() {
    let mut views = DualViewSync::default();
    views.sync(&snapshot());

    assert!(views.in_sync());
    assert_eq!(views.compact.now_playing.title, "Song");
    assert_eq!(views.expanded.now_playing.artist, "Band");
    assert_eq!(views.expanded.now_playing.volume, 40);
    assert_eq!(views.compact.now_playing.toggle, Toggle::Pause);
}

#[test]
fn compact_bar_tracks_seek_range_and_label() {
    let mut views = DualViewSync::default();
    views.sync(&snapshot());

    let bar = &views.compact;
    assert!(bar.visible);
    assert!(bar.controls_enabled);
    assert_eq!(bar.seek_value, 75);
    assert_eq!(bar.seek_max, 200);
    assert_eq!(bar.time_label, "1:15 / 3:20");
}

#[test]
fn expanded_view_reports_progress_and_labels() {
    let mut views = DualViewSync::default();
    views.sync(&snapshot());

    let view = &views.expanded;
    assert!((view.progress - 0.375).abs() < 1e-9);
    assert_eq!(view.elapsed, "1:15");
    assert_eq!(view.total, "3:20");
}

#[test]
fn unknown_duration_reads_zero() {
    let mut views = DualViewSync::default();
    views.sync(&TransportSnapshot {
        duration: None,
        has_source: false,
        ..snapshot()
    });

    assert_eq!(views.expanded.progress, 0.0);
    assert_eq!(views.expanded.total, "0:00");
    assert_eq!(views.compact.seek_max, 0);
    assert!(!views.compact.controls_enabled);
}

#[test]
fn seek_drag_starts_only_inside_the_track() {
    let track = Rect::new(10, 5, 11, 1);
    let mut drag = SeekDrag::default();

    assert_eq!(drag.pointer_down(track, 9, 5), None);
    assert_eq!(drag.pointer_down(track, 15, 6), None);
    assert!(!drag.is_dragging());
    assert_eq!(drag.pointer_move(track, 15), None);

    assert_eq!(drag.pointer_down(track, 15, 5), Some(0.5));
    assert!(drag.is_dragging());
}

#[test]
fn seek_drag_clamps_while_moving_and_stops_on_release() {
    let track = Rect::new(10, 5, 11, 1);
    let mut drag = SeekDrag::default();
    drag.pointer_down(track, 10, 5);

    assert_eq!(drag.pointer_move(track, 0), Some(0.0));
    assert_eq!(drag.pointer_move(track, 20), Some(1.0));
    assert_eq!(drag.pointer_move(track, 80), Some(1.0));

    drag.pointer_up();
    assert!(!drag.is_dragging());
    assert_eq!(drag.pointer_move(track, 12), None);
}

#[test]
fn degenerate_track_yields_zero() {
    assert_eq!(SeekDrag::fraction_at(Rect::new(0, 0, 1, 1), 0), 0.0);
    assert_eq!(SeekDrag::fraction_at(Rect::new(0, 0, 0, 1), 3), 0.0);
}
