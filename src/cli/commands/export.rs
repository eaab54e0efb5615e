use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::ledger::AttendanceLedger;
use crate::db::log;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::utils::path::expand_tilde;
use tracing::warn;

/// Handle the `export` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut store = SqliteStore::open(&cfg.database)?;
        let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;

        let path = expand_tilde(file);
        ExportLogic::export(ledger.events(), *format, &path, *force)?;

        if let Err(e) = log::audit(
            store.conn(),
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} events as {}", ledger.events().len(), format.as_str()),
        ) {
            warn!(error = %e, "failed to write audit log");
        }
    }

    Ok(())
}
