use crate::cli::parser::ClockAction;
use crate::context::AppContext;
use crate::core::dashboard;
use crate::errors::AppResult;

/// Every invocation first rebuilds the tracker from the server, then acts.
pub async fn handle(action: &ClockAction, ctx: AppContext) -> AppResult<()> {
    let mut tracker = ctx.into_tracker()?;
    tracker.reconcile().await?;

    match action {
        ClockAction::In => {
            tracker.clock_in().await?;
        }
        ClockAction::Out => {
            let summary = tracker.clock_out().await?;
            dashboard::print_summary(&summary);
        }
        ClockAction::Status => dashboard::print_status(&tracker.snapshot()),
        ClockAction::Watch { seconds } => dashboard::watch(&tracker, *seconds).await?,
    }

    tracker.shutdown();
    Ok(())
}
