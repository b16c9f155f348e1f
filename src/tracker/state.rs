use crate::config::Config;
use crate::models::clock::{BreakRecord, BreakType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackerState {
    ClockedOut,
    ClockedIn,
    OnBreak,
}

impl TrackerState {
    pub fn is_clocked_in(&self) -> bool {
        !matches!(self, TrackerState::ClockedOut)
    }
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackerState::ClockedOut => "Clocked out",
            TrackerState::ClockedIn => "Clocked in",
            TrackerState::OnBreak => "On break",
        })
    }
}

/// Advisory break lengths. Exceeding one only raises a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPolicy {
    pub tea_limit_secs: u64,
    pub lunch_limit_secs: u64,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            tea_limit_secs: 15 * 60,
            lunch_limit_secs: 45 * 60,
        }
    }
}

impl BreakPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            tea_limit_secs: cfg.tea_break_minutes * 60,
            lunch_limit_secs: cfg.lunch_break_minutes * 60,
        }
    }

    pub fn limit_secs(&self, break_type: BreakType) -> u64 {
        match break_type {
            BreakType::Tea => self.tea_limit_secs,
            BreakType::Lunch => self.lunch_limit_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveBreak {
    /// Unknown when the break was restored from local storage of an older release.
    pub break_id: Option<i64>,
    pub break_type: BreakType,
    pub started_at: DateTime<Utc>,
    pub notes: String,
}

impl From<BreakRecord> for ActiveBreak {
    fn from(b: BreakRecord) -> Self {
        Self {
            break_id: Some(b.break_id),
            break_type: b.break_type,
            started_at: b.start_time,
            notes: b.notes,
        }
    }
}

/// Live counters, shared with the tick tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Counters {
    pub worked_seconds: u64,
    pub break_seconds: u64,
    pub break_limit_secs: u64,
    pub break_exceeded: bool,
}

impl Counters {
    pub fn tick_worked(&mut self) {
        self.worked_seconds += 1;
    }

    pub fn tick_break(&mut self) {
        self.break_seconds += 1;
        self.refresh_exceeded();
    }

    pub fn start_break(&mut self, limit_secs: u64, elapsed: u64) {
        self.break_limit_secs = limit_secs;
        self.break_seconds = elapsed;
        self.refresh_exceeded();
    }

    pub fn clear_break(&mut self) {
        self.break_seconds = 0;
        self.break_limit_secs = 0;
        self.break_exceeded = false;
    }

    fn refresh_exceeded(&mut self) {
        self.break_exceeded = self.break_seconds > self.break_limit_secs;
    }
}

/// Read-only view of the tracker for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: TrackerState,
    pub record_id: Option<i64>,
    pub clock_in_time: Option<DateTime<Utc>>,
    pub active_break: Option<ActiveBreak>,
    pub worked_seconds: u64,
    pub break_seconds: u64,
    pub break_limit_secs: u64,
    pub break_exceeded: bool,
}
