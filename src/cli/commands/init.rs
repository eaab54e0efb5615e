use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::core::rewards::RewardEngine;
use crate::db::log;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use tracing::warn;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the default reward catalog
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rCheckin…");

    let mut store = SqliteStore::open(&db_path)?;
    let cfg = Config {
        database: db_path.clone(),
        ..Config::load()?
    };
    let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;
    let rewards = RewardEngine::load(&mut store)?;

    println!("✅ Database initialized at {}", db_path);
    println!(
        "🎁 {} rewards in catalog, {} check-ins recorded",
        rewards.catalog().len(),
        ledger.total_check_ins()
    );

    if let Err(e) = log::audit(store.conn(), "init", &db_path, "Database initialized") {
        warn!(error = %e, "failed to write audit log");
    }

    Ok(())
}
