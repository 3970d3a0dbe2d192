use std::time::Duration;

/// Format as `M:SS`. Unknown or zero durations read `0:00`.
pub fn format_time(d: Option<Duration>) -> String {
    let secs = d.map(|d| d.as_secs()).unwrap_or(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Clamp a position in seconds to `[0, max]`. NaN clamps to zero.
pub fn clamp_position(seconds: f64, max: Option<Duration>) -> Duration {
    let lower = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
    let clamped = match max {
        Some(m) => lower.min(m.as_secs_f64()),
        None => lower,
    };
    Duration::try_from_secs_f64(clamped).unwrap_or(Duration::MAX)
}
