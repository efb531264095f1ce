//! Display formatting for progress readouts.
//!
//! Front-ends (CLI, overlays) format tracker values through these helpers so
//! countdowns and percentages look the same everywhere.

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use action_progress_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(59), "0:59");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: i64) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{}:{:02}", mins, secs)
}

/// Format an estimated remaining time given in milliseconds.
///
/// Estimates can dip below zero right at a tick boundary; those read as
/// `zero_label`. Partial seconds round up so a countdown never shows
/// `0:00` while time is still left.
///
/// # Examples
/// ```
/// use action_progress_types::formatting::format_remaining_ms;
/// assert_eq!(format_remaining_ms(9_600, "Done"), "0:10");
/// assert_eq!(format_remaining_ms(61_000, "Done"), "1:01");
/// assert_eq!(format_remaining_ms(-40, "Done"), "Done");
/// ```
pub fn format_remaining_ms(ms: i64, zero_label: &str) -> String {
    if ms <= 0 {
        return zero_label.to_string();
    }
    let secs = (ms + 999) / 1000;
    format_duration(secs)
}

/// Format a completion fraction (`0.0..=1.0`) as a percentage with no decimals.
///
/// # Examples
/// ```
/// use action_progress_types::formatting::format_fraction_pct;
/// assert_eq!(format_fraction_pct(0.5), "50%");
/// assert_eq!(format_fraction_pct(1.2), "100%");
/// ```
pub fn format_fraction_pct(fraction: f32) -> String {
    format!("{:.0}%", fraction.clamp(0.0, 1.0) * 100.0)
}

/// Format processed steps against the total, e.g. `3/10`.
pub fn format_steps(processed: i32, total: i32) -> String {
    format!("{}/{}", processed.min(total), total)
}
