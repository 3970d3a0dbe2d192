use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::sink::probe_duration;
use super::thread::{Clock, Ticker};

#[test]
fn clock_stands_still_until_started() {
    let clock = Clock::default();
    assert!(!clock.is_running());
    assert_eq!(clock.position(), Duration::ZERO);
}

#[test]
fn clock_accumulates_across_pauses() {
    let mut clock = Clock::default();
    clock.start();
    thread::sleep(Duration::from_millis(20));
    clock.pause();
    let paused_at = clock.position();
    assert!(paused_at >= Duration::from_millis(20));

    thread::sleep(Duration::from_millis(20));
    assert_eq!(clock.position(), paused_at);

    clock.start();
    thread::sleep(Duration::from_millis(10));
    assert!(clock.position() >= paused_at + Duration::from_millis(10));
}

#[test]
fn clock_reset_keeps_running_state() {
    let mut clock = Clock::default();
    clock.reset(Duration::from_secs(30));
    assert!(!clock.is_running());
    assert_eq!(clock.position(), Duration::from_secs(30));

    clock.start();
    clock.reset(Duration::from_secs(5));
    assert!(clock.is_running());
    let pos = clock.position();
    assert!(pos >= Duration::from_secs(5) && pos < Duration::from_secs(6));
}

#[test]
fn probe_duration_gives_up_on_garbage() {
    let bytes: Arc<[u8]> = Arc::from(vec![0u8; 64]);
    assert_eq!(probe_duration(&bytes), None);
}

#[test]
fn ticker_fires_once_per_deadline_regardless_of_traffic() {
    let period = Duration::from_millis(250);
    let start = Instant::now();
    let mut ticker = Ticker::new(period, start);

    // A burst of commands inside the period never ticks.
    for ms in [10, 50, 120, 249] {
        assert!(!ticker.due(start + Duration::from_millis(ms)));
    }
    assert_eq!(
        ticker.remaining(start + Duration::from_millis(200)),
        Duration::from_millis(50)
    );

    // Past the deadline it ticks even though the wait never timed out.
    let late = start + Duration::from_millis(260);
    assert_eq!(ticker.remaining(late), Duration::ZERO);
    assert!(ticker.due(late));
    assert!(!ticker.due(late + Duration::from_millis(100)));
    assert!(ticker.due(late + period));
}
