use crate::context::AppContext;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(print: bool, ctx: &AppContext) -> AppResult<()> {
    if print {
        LogLogic::print_log(&ctx.store)?;
    }

    Ok(())
}
