use crate::cli::parser::BreakAction;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::utils::time::format_hms;

pub async fn handle(action: &BreakAction, ctx: AppContext) -> AppResult<()> {
    let mut tracker = ctx.into_tracker()?;
    tracker.reconcile().await?;

    match action {
        BreakAction::Start { break_type, notes } => {
            tracker.take_break(*break_type, notes).await?;
            println!(
                "Allowance   : {}",
                format_hms(tracker.snapshot().break_limit_secs)
            );
        }
        BreakAction::End => {
            tracker.end_break().await?;
            println!("Worked      : {}", format_hms(tracker.worked_seconds()));
        }
    }

    tracker.shutdown();
    Ok(())
}
