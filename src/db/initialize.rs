use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::debug;

/// Bring the schema of `conn` up to date. Safe on every open: migrations
/// already recorded in `log` are skipped.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let applied =
        run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))?;
    if applied > 0 {
        debug!(applied, "schema migrated");
    }
    Ok(())
}
