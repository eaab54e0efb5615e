//! Persistent Store: the durable home of the attendance log, the
//! attendance counters and the reward catalog.
//!
//! The ledger and the reward engine only talk to this trait, so they can be
//! exercised against [`MemoryStore`] in tests and [`SqliteStore`] in the CLI.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;
use crate::models::{AttendanceEvent, AttendanceState, Reward};

/// One audit line (`log` table row without id/date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub trait Store {
    /// Attendance log, oldest first.
    fn load_log(&self) -> AppResult<Vec<AttendanceEvent>>;

    /// Stored counters, `None` on a fresh store.
    fn load_state(&self) -> AppResult<Option<AttendanceState>>;

    /// Stored reward catalog in seed order, `None` if it was never seeded.
    fn load_catalog(&self) -> AppResult<Option<Vec<Reward>>>;

    /// Append `event` and overwrite the counters with `state`, all or nothing.
    fn commit_check_in(&mut self, event: &AttendanceEvent, state: &AttendanceState)
    -> AppResult<()>;

    /// Overwrite the counters alone (load-time recovery).
    fn save_state(&mut self, state: &AttendanceState) -> AppResult<()>;

    /// Replace the whole catalog, all or nothing.
    fn save_catalog(&mut self, catalog: &[Reward]) -> AppResult<()>;

    fn record_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}
