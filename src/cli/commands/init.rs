use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::storage::LocalStore;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the local store and its pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.api_url.clone(), cli.test)?;

    println!("⚙️  Initializing emptrack…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🌐 API         : {}", &cfg.api_url);

    let store = LocalStore::open(&cfg.database)?;

    ttlog_quiet(
        store.conn(),
        "init",
        "",
        &format!("Local store initialized at {}", &cfg.database),
    );

    println!("🎉 emptrack initialization completed!");
    Ok(())
}
