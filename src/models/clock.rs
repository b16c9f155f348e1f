use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Tea,
    Lunch,
}

impl BreakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Tea => "tea",
            BreakType::Lunch => "lunch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreakType::Tea => "Tea Break",
            BreakType::Lunch => "Lunch Break",
        }
    }
}

impl fmt::Display for BreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tea" => Ok(BreakType::Tea),
            "lunch" => Ok(BreakType::Lunch),
            other => Err(AppError::InvalidBreakType(other.to_string())),
        }
    }
}

/// A clock-in record as issued by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockRecord {
    #[serde(rename = "id")]
    pub record_id: i64,
    pub clock_in_time: DateTime<Utc>,
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
}

impl ClockRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }
}

/// A break inside an open clock record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakRecord {
    #[serde(rename = "id")]
    pub break_id: i64,
    pub break_type: BreakType,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl BreakRecord {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Totals reported after a successful clock-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOutSummary {
    pub record_id: i64,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: DateTime<Utc>,
    pub worked_seconds: u64,
    /// Worked time above the overtime threshold.
    pub extra_seconds: u64,
}

impl ClockOutSummary {
    pub fn new(
        record_id: i64,
        clock_in: Option<DateTime<Utc>>,
        clock_out: DateTime<Utc>,
        worked_seconds: u64,
        overtime_threshold_secs: u64,
    ) -> Self {
        Self {
            record_id,
            clock_in,
            clock_out,
            worked_seconds,
            extra_seconds: worked_seconds.saturating_sub(overtime_threshold_secs),
        }
    }
}
