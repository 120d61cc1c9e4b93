//! Centralized number formatting utilities.
//!
//! All numeric display formatting for the terminal front end goes
//! through this module so counters, rates, and countdowns render
//! consistently.

/// Format a large number with K/M suffix for compact display.
///
/// - Values >= 1,000,000 are formatted as `X.XXM`
/// - Values >= 1,000 are formatted as `X.XXK`
/// - Values below 1,000 are formatted as-is
///
/// # Examples
/// ```
/// use clickrush_types::formatting::format_compact;
/// assert_eq!(format_compact(500), "500");
/// assert_eq!(format_compact(1_500), "1.50K");
/// assert_eq!(format_compact(15_000), "15.00K");
/// assert_eq!(format_compact(1_500_000), "1.50M");
/// ```
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Format a clicks-per-second rate with one decimal.
///
/// A non-positive elapsed time displays as `0.0/s` rather than
/// dividing by zero.
///
/// # Examples
/// ```
/// use clickrush_types::formatting::format_rate;
/// assert_eq!(format_rate(7, 10.0), "0.7/s");
/// assert_eq!(format_rate(7, 0.0), "0.0/s");
/// ```
pub fn format_rate(clicks: u64, elapsed_secs: f64) -> String {
    if elapsed_secs <= 0.0 {
        return "0.0/s".to_string();
    }
    format!("{:.1}/s", clicks as f64 / elapsed_secs)
}

/// Format a remaining-seconds countdown as `M:SS`.
///
/// Negative values clamp to `0:00`.
///
/// # Examples
/// ```
/// use clickrush_types::formatting::format_clock;
/// assert_eq!(format_clock(69), "1:09");
/// assert_eq!(format_clock(5), "0:05");
/// assert_eq!(format_clock(-3), "0:00");
/// ```
pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}
