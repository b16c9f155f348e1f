use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::yes_no;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> AppResult<()> {
    let api = ctx.api()?;
    let session = ctx.sessions().login(&api, email, password).await?;

    success(format!("Logged in as {}", session.username));
    if session.is_admin {
        info("Administrator account");
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> AppResult<()> {
    match ctx.sessions().logout()? {
        Some(s) => success(format!("Logged out {}", s.username)),
        None => info("No active session."),
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> AppResult<()> {
    let session = ctx.require_session()?;

    println!("User        : {}", session.username);
    println!("User id     : {}", session.user_id);
    println!("Admin       : {}", yes_no(session.is_admin));

    if let Some(profile) = ctx.sessions().cached_profile()? {
        println!("Name        : {}", profile.full_name());
        println!("Email       : {}", profile.email);
        if !profile.role.is_empty() {
            println!("Role        : {}", profile.role);
        }
    }
    Ok(())
}
