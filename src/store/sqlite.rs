use super::Store;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceEvent, AttendanceState, Reward};
use rusqlite::Connection;
use tracing::debug;

/// [`Store`] backed by a single SQLite file. Every write runs in its own
/// transaction, so a crash never leaves an event without its counters.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        debug!(path, "sqlite store opened");
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl Store for SqliteStore {
    fn load_log(&self) -> AppResult<Vec<AttendanceEvent>> {
        queries::load_events(&self.pool.conn)
    }

    fn load_state(&self) -> AppResult<Option<AttendanceState>> {
        queries::load_state(&self.pool.conn)
    }

    fn load_catalog(&self) -> AppResult<Option<Vec<Reward>>> {
        queries::load_catalog(&self.pool.conn)
    }

    fn commit_check_in(
        &mut self,
        event: &AttendanceEvent,
        state: &AttendanceState,
    ) -> AppResult<()> {
        let tx = self.pool.conn.transaction()?;
        queries::insert_event(&tx, event)?;
        queries::upsert_state(&tx, state)?;
        tx.commit()?;
        Ok(())
    }

    fn save_state(&mut self, state: &AttendanceState) -> AppResult<()> {
        queries::upsert_state(&self.pool.conn, state)
    }

    fn save_catalog(&mut self, catalog: &[Reward]) -> AppResult<()> {
        let tx = self.pool.conn.transaction()?;
        queries::replace_catalog(&tx, catalog)?;
        tx.commit()?;
        Ok(())
    }

    fn record_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::audit(&self.pool.conn, operation, target, message)
    }
}
