//! Export of fetched reports to files.

mod fs_utils;
mod json_csv;

pub use fs_utils::ensure_writable;

use crate::errors::{AppError, AppResult};
use crate::models::report::Report;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, rows: usize, path: &Path) {
    success(format!(
        "{label} export completed: {rows} row(s) written to {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Write `report` to `path`. Without `force`, an existing file is only
/// replaced after confirmation.
pub fn export_report(report: &Report, format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(AppError::Export(format!(
            "directory {} does not exist",
            parent.display()
        )));
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => json_csv::export_csv(report, path),
        ExportFormat::Json => json_csv::export_json(report, path),
    }
}
