//! Terminal rendering of the time clock.

use crate::api::ClockApi;
use crate::errors::AppResult;
use crate::models::clock::ClockOutSummary;
use crate::tracker::{Snapshot, TimeTracker, TrackerState};
use crate::ui::messages::warning;
use crate::utils::colors::{RED, RESET};
use crate::utils::formatting::{bold, state_color};
use crate::utils::time::{format_hms, hours_decimal, local_datetime};
use std::io::{self, Write};
use std::time::Duration;

pub fn status_lines(s: &Snapshot) -> Vec<String> {
    let mut lines = vec![format!(
        "Status      : {}{}{}",
        state_color(s.state),
        s.state,
        RESET
    )];

    if s.state == TrackerState::ClockedOut {
        return lines;
    }

    if let Some(id) = s.record_id {
        lines.push(format!("Record      : #{}", id));
    }
    if let Some(t) = s.clock_in_time {
        lines.push(format!("Clocked in  : {}", local_datetime(t)));
    }
    lines.push(format!("Worked      : {}", format_hms(s.worked_seconds)));

    if let Some(b) = &s.active_break {
        lines.push(format!(
            "Break       : {} since {}",
            b.break_type.label(),
            local_datetime(b.started_at)
        ));
        let elapsed = format_hms(s.break_seconds);
        let limit = format_hms(s.break_limit_secs);
        if s.break_exceeded {
            lines.push(format!(
                "Break time  : {RED}{elapsed} / {limit} (exceeded){RESET}"
            ));
        } else {
            lines.push(format!("Break time  : {elapsed} / {limit}"));
        }
        if !b.notes.is_empty() {
            lines.push(format!("Notes       : {}", b.notes));
        }
    }

    lines
}

pub fn print_status(s: &Snapshot) {
    for line in status_lines(s) {
        println!("{line}");
    }
}

pub fn print_summary(summary: &ClockOutSummary) {
    println!("{}", bold(&format!("Record #{}", summary.record_id)));
    if let Some(t) = summary.clock_in {
        println!("Clocked in  : {}", local_datetime(t));
    }
    println!("Clocked out : {}", local_datetime(summary.clock_out));
    println!(
        "Worked      : {} ({:.2} h)",
        format_hms(summary.worked_seconds),
        hours_decimal(summary.worked_seconds)
    );
    if summary.extra_seconds > 0 {
        println!(
            "Extra       : {} ({:.2} h)",
            format_hms(summary.extra_seconds),
            hours_decimal(summary.extra_seconds)
        );
    }
}

fn live_line(s: &Snapshot) -> String {
    match s.state {
        TrackerState::ClockedOut => "Clocked out".to_string(),
        TrackerState::ClockedIn => format!("⏱  Worked {}", format_hms(s.worked_seconds)),
        TrackerState::OnBreak => format!(
            "☕ Worked {}  Break {} / {}{}",
            format_hms(s.worked_seconds),
            format_hms(s.break_seconds),
            format_hms(s.break_limit_secs),
            if s.break_exceeded { "  (exceeded)" } else { "" }
        ),
    }
}

/// Redraw the counters once a second until Ctrl-C, or for `seconds` seconds.
pub async fn watch<A: ClockApi>(tracker: &TimeTracker<A>, seconds: Option<u64>) -> AppResult<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut remaining = seconds;
    let mut warned = tracker.break_exceeded();

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let s = tracker.snapshot();
        print!("\r{}\x1b[K", live_line(&s));
        io::stdout().flush()?;

        if s.break_exceeded && !warned {
            println!();
            warning("Break allowance exceeded");
            warned = true;
        }

        if let Some(n) = remaining.as_mut() {
            if *n == 0 {
                break;
            }
            *n -= 1;
        }
    }

    println!();
    Ok(())
}
