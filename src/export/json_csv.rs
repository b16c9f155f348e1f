use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::report::Report;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// JSON export keeps the typed rows, so numbers stay numbers.
fn report_json(report: &Report) -> serde_json::Result<String> {
    match report {
        Report::WorkHours(rows) => serde_json::to_string_pretty(rows),
        Report::LeaveBalance(rows) => serde_json::to_string_pretty(rows),
        Report::LeaveRequests(rows) => serde_json::to_string_pretty(rows),
        Report::Tasks(rows) => serde_json::to_string_pretty(rows),
        Report::BillableHours(rows) => serde_json::to_string_pretty(rows),
        Report::PerformanceMetrics(metrics) => serde_json::to_string_pretty(metrics),
    }
}

/// Export JSON pretty-printed.
pub(crate) fn export_json(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = report_json(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", report.len(), path);
    Ok(())
}

/// Export CSV with the same columns the terminal table shows.
pub(crate) fn export_csv(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr =
        csv::Writer::from_path(path).map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    let (headers, rows) = report.to_rows();
    wtr.write_record(&headers)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    for row in &rows {
        wtr.write_record(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", rows.len(), path);
    Ok(())
}
