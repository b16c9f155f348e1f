//! Clock records with their breaks, as the timesheet endpoint returns them.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetBreak {
    pub id: i64,
    #[serde(default)]
    pub break_type: String,
    pub time_started: DateTime<Utc>,
    #[serde(default)]
    pub time_ended: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub id: i64,
    pub time_clocked_in: DateTime<Utc>,
    #[serde(default)]
    pub time_clocked_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub breaks: Vec<TimesheetBreak>,
}

impl TimesheetEntry {
    /// Local calendar day of the clock-in.
    pub fn day(&self) -> NaiveDate {
        self.time_clocked_in.with_timezone(&Local).date_naive()
    }

    /// Seconds between clock-in and clock-out; an open entry runs until `now`.
    pub fn seconds_until(&self, now: DateTime<Utc>) -> u64 {
        let end = self.time_clocked_out.unwrap_or(now);
        (end - self.time_clocked_in).num_seconds().max(0) as u64
    }
}

/// `"2h 5m"`, `"45m"`, or `"Ongoing"` while `end` is unset.
pub fn format_span(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let Some(end) = end else {
        return "Ongoing".to_string();
    };
    let minutes = (end - start).num_minutes().max(0);
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 { format!("{}h {}m", h, m) } else { format!("{}m", m) }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimesheetStats {
    pub total_hours: f64,
    pub avg_hours: f64,
    pub days_worked: usize,
}

impl TimesheetStats {
    /// Breaks are not subtracted. Average is per distinct clock-in day.
    pub fn compute(entries: &[TimesheetEntry], now: DateTime<Utc>) -> Self {
        let total_secs: u64 = entries.iter().map(|e| e.seconds_until(now)).sum();
        let total_hours = total_secs as f64 / 3600.0;
        let days_worked = group_by_day(entries).len();
        Self {
            total_hours,
            avg_hours: total_hours / days_worked.max(1) as f64,
            days_worked,
        }
    }
}

/// Entries keyed by local clock-in day, oldest day first.
pub fn group_by_day(entries: &[TimesheetEntry]) -> BTreeMap<NaiveDate, Vec<&TimesheetEntry>> {
    let mut days: BTreeMap<NaiveDate, Vec<&TimesheetEntry>> = BTreeMap::new();
    for e in entries {
        days.entry(e.day()).or_default().push(e);
    }
    days
}
