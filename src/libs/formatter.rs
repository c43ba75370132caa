//! Time formatting for display.
//!
//! The attendance core works with `chrono::Duration` values and timestamps;
//! this module turns them into the strings shown in tables and messages.
//!
//! ## Format Specifications
//!
//! - Durations use `H:MM:SS`: hours are not padded and may exceed 24,
//!   minutes and seconds are always two digits.
//! - Negative durations are shown as `0:00:00`.
//! - Times of day use `HH:MM:SS`; a missing time is shown as `-`.
//!
//! ```rust
//! use chrono::Duration;
//! use timecard::libs::formatter::format_duration;
//!
//! assert_eq!(format_duration(&(Duration::hours(8) + Duration::minutes(45))), "8:45:00");
//! assert_eq!(format_duration(&Duration::seconds(-5)), "0:00:00");
//! ```

use chrono::{Duration, NaiveDateTime};

/// Formats a duration as `H:MM:SS`.
pub fn format_duration(duration: &Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Formats an optional duration, showing `-` when it is not known yet.
pub fn format_optional_duration(duration: Option<Duration>) -> String {
    duration.map_or_else(|| "-".to_string(), |d| format_duration(&d))
}

/// Formats the time-of-day part of a timestamp, showing `-` when absent.
pub fn format_time(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map_or_else(|| "-".to_string(), |t| t.format("%H:%M:%S").to_string())
}
