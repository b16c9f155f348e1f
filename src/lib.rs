//! emptrack library root.
//! Exposes the CLI parser, the high-level `run()` function and the modules
//! behind it: API gateway, session store, time tracker and local store.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod session;
pub mod tracker;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::commands::config::ConfigArgs;
use cli::parser::{Cli, Commands};
use config::Config;
use context::AppContext;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr. `EMPTRACK_LOG` wins over the configured level.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_env("EMPTRACK_LOG")
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config {
            print_config,
            check,
            edit_config,
            editor,
        } => {
            let args = ConfigArgs {
                print_config: *print_config,
                check: *check,
                edit_config: *edit_config,
                editor: editor.as_deref(),
            };
            return commands::config::handle(&args, &cfg);
        }
        _ => {}
    }

    let ctx = AppContext::open(cfg)?;

    match &cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Clock { action } => commands::clock::handle(action, ctx).await,
        Commands::Break { action } => commands::breaks::handle(action, ctx).await,
        Commands::Tasks { action } => commands::tasks::handle(action, &ctx).await,
        Commands::Projects { action } => commands::projects::handle(action, &ctx).await,
        Commands::Employees { action } => commands::employees::handle(action, &ctx).await,
        Commands::Leave { action } => commands::leave::handle(action, &ctx).await,
        Commands::Timesheet { date } => commands::timesheet::handle(&ctx, date.as_deref()).await,
        Commands::Report {
            kind,
            format,
            file,
            force,
        } => commands::report::handle(&ctx, *kind, *format, file.as_deref(), *force).await,
        Commands::Log { print } => commands::log::handle(*print, &ctx),
        Commands::Init | Commands::Config { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; command-line overrides win.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(url) = &cli.api_url {
        cfg.api_url = url.clone();
    }

    init_tracing(&cfg);
    tracing::debug!(database = %cfg.database, api = %cfg.api_url, "configuration loaded");

    dispatch(&cli, cfg).await
}
