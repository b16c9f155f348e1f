use crate::context::AppContext;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::models::report::ReportKind;

/// Reports are admin only.
pub async fn handle(
    ctx: &AppContext,
    kind: ReportKind,
    format: Option<ExportFormat>,
    file: Option<&str>,
    force: bool,
) -> AppResult<()> {
    let (_, api) = ctx.admin_api()?;
    let report = ReportLogic::fetch(&api, kind).await?;

    match file {
        Some(file) => ReportLogic::export(&report, format, file, force)?,
        None => ReportLogic::print(&report),
    }
    Ok(())
}
