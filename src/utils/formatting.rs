//! Formatting utilities used for CLI outputs.

use crate::models::leave::LeaveStatus;
use crate::models::task::TaskStatus;
use crate::tracker::TrackerState;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

pub fn state_color(state: TrackerState) -> &'static str {
    match state {
        TrackerState::ClockedOut => GREY,
        TrackerState::ClockedIn => GREEN,
        TrackerState::OnBreak => YELLOW,
    }
}

pub fn task_status_color(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => RESET,
        TaskStatus::InProgress => CYAN,
        TaskStatus::Completed => GREEN,
        TaskStatus::ExtensionApproved => YELLOW,
        TaskStatus::WaitingApproval => YELLOW,
    }
}

pub fn leave_status_color(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Draft => GREY,
        LeaveStatus::Pending => YELLOW,
        LeaveStatus::Approved => GREEN,
        LeaveStatus::Rejected => RED,
    }
}

/// Cut `s` to `max` characters, ending with "..." when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
