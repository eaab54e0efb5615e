use super::{AuditEntry, Store};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, AttendanceState, Reward};

/// In-memory [`Store`] for tests.
///
/// `fail_writes(true)` makes every write fail without touching the stored
/// data, which is how a lost durable write is simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    log: Vec<AttendanceEvent>,
    state: Option<AttendanceState>,
    catalog: Option<Vec<Reward>>,
    audit: Vec<AuditEntry>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already durable data.
    pub fn with_data(
        log: Vec<AttendanceEvent>,
        state: Option<AttendanceState>,
        catalog: Option<Vec<Reward>>,
    ) -> Self {
        Self {
            log,
            state,
            catalog,
            ..Self::default()
        }
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn log(&self) -> &[AttendanceEvent] {
        &self.log
    }

    pub fn state(&self) -> Option<&AttendanceState> {
        self.state.as_ref()
    }

    pub fn catalog(&self) -> Option<&[Reward]> {
        self.catalog.as_deref()
    }

    pub fn audit_entries(&self) -> &[AuditEntry] {
        &self.audit
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes {
            Err(AppError::Persistence("simulated write failure".into()))
        } else {
            Ok(())
        }
    }
}

impl Store for MemoryStore {
    fn load_log(&self) -> AppResult<Vec<AttendanceEvent>> {
        Ok(self.log.clone())
    }

    fn load_state(&self) -> AppResult<Option<AttendanceState>> {
        Ok(self.state.clone())
    }

    fn load_catalog(&self) -> AppResult<Option<Vec<Reward>>> {
        Ok(self.catalog.clone())
    }

    fn commit_check_in(
        &mut self,
        event: &AttendanceEvent,
        state: &AttendanceState,
    ) -> AppResult<()> {
        self.check_writable()?;
        self.log.push(event.clone());
        self.state = Some(state.clone());
        self.writes += 1;
        Ok(())
    }

    fn save_state(&mut self, state: &AttendanceState) -> AppResult<()> {
        self.check_writable()?;
        self.state = Some(state.clone());
        self.writes += 1;
        Ok(())
    }

    fn save_catalog(&mut self, catalog: &[Reward]) -> AppResult<()> {
        self.check_writable()?;
        self.catalog = Some(catalog.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn record_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.check_writable()?;
        self.audit.push(AuditEntry {
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
