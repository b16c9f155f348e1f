use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::timesheet::{TimesheetStats, format_span, group_by_day};
use crate::ui::messages::{header, info};
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::truncate;
use crate::utils::table::Table;
use crate::utils::time::local_hm;
use chrono::Utc;

/// Records grouped by day, each break on its own row, then the totals.
pub async fn handle(ctx: &AppContext, date: Option<&str>) -> AppResult<()> {
    let date = parse_optional_date(date)?;
    let (_, api) = ctx.authed_api()?;
    let entries = api.timesheet(date).await?;
    tracing::debug!(entries = entries.len(), "timesheet fetched");

    header("Timesheet");
    if entries.is_empty() {
        info("No timesheet entries found.");
        return Ok(());
    }

    let now = Utc::now();
    for (day, records) in group_by_day(&entries) {
        let day_secs: u64 = records.iter().map(|e| e.seconds_until(now)).sum();
        println!(
            "\n{} ({:.1}h)",
            day.format("%A, %B %-d, %Y"),
            day_secs as f64 / 3600.0
        );

        let mut table = Table::new(&["ID", "In", "Out", "Duration", "Break", "Notes"]);
        for e in records {
            table.add_row(vec![
                e.id.to_string(),
                local_hm(e.time_clocked_in),
                e.time_clocked_out.map(local_hm).unwrap_or_else(|| "Ongoing".to_string()),
                format_span(e.time_clocked_in, e.time_clocked_out),
                e.breaks.first().map(|b| b.break_type.clone()).unwrap_or_else(|| "-".to_string()),
                truncate(e.notes.as_deref().unwrap_or_default(), 40),
            ]);
            for b in &e.breaks {
                table.add_row(vec![
                    String::new(),
                    format!("↳ {}", local_hm(b.time_started)),
                    b.time_ended.map(local_hm).unwrap_or_else(|| "Ongoing".to_string()),
                    format_span(b.time_started, b.time_ended),
                    b.break_type.clone(),
                    String::new(),
                ]);
            }
        }
        table.print();
    }

    let stats = TimesheetStats::compute(&entries, now);
    println!();
    println!("Total hours : {:.1}h", stats.total_hours);
    println!("Average/day : {:.1}h", stats.avg_hours);
    println!("Days worked : {}", stats.days_worked);
    Ok(())
}
