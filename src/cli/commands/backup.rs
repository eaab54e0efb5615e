use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use tracing::warn;

/// Handle the `backup` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let Some(written) = BackupLogic::backup(&cfg.database, file, *compress)? else {
            return Ok(());
        };

        let store = SqliteStore::open(&cfg.database)?;
        if let Err(e) = log::audit(
            store.conn(),
            "backup",
            &written.to_string_lossy(),
            if *compress {
                "Compressed backup created"
            } else {
                "Backup created"
            },
        ) {
            warn!(error = %e, "failed to write audit log");
        }
    }

    Ok(())
}
