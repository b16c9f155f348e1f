//! Time utilities: elapsed-seconds formatting and local rendering of server timestamps.

use chrono::{DateTime, Local, Utc};

/// `3725` → `"01:02:05"`. Hours grow past two digits when needed.
pub fn format_hms(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Hours as a decimal, the way reports present them.
pub fn hours_decimal(secs: u64) -> f64 {
    secs as f64 / 3600.0
}

/// `HH:MM` in the local timezone.
pub fn local_hm(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M").to_string()
}

/// `YYYY-MM-DD HH:MM:SS` in the local timezone.
pub fn local_datetime(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
