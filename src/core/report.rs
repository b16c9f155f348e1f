use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::export::{ExportFormat, export_report};
use crate::models::report::{Report, ReportKind};
use crate::ui::messages::{header, info};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub struct ReportLogic;

impl ReportLogic {
    pub async fn fetch(api: &ApiClient, kind: ReportKind) -> AppResult<Report> {
        let report = api.report(kind).await?;
        tracing::debug!(rows = report.len(), "report fetched");
        Ok(report)
    }

    pub fn print(report: &Report) {
        header(report.kind().title());

        if report.is_empty() {
            info("No data available for this report.");
            return;
        }

        let (headers, rows) = report.to_rows();
        let mut table = Table::new(&headers);
        for row in rows {
            table.add_row(row);
        }
        table.print();
    }

    /// Write `report` to `file`. The format defaults to the file extension,
    /// then to CSV.
    pub fn export(report: &Report, format: Option<ExportFormat>, file: &str, force: bool) -> AppResult<()> {
        let path = expand_tilde(file);
        let format = format
            .or_else(|| ExportFormat::from_path(&path))
            .unwrap_or(ExportFormat::Csv);

        export_report(report, format, &path, force)
    }
}
