//! Attendance Ledger: the append-only check-in log plus the counters
//! derived from it (streak, lifetime total, last check-in date).
//!
//! The ledger keeps an in-memory copy of the last durable snapshot. A
//! check-in is computed on a copy of the counters, committed to the store in
//! one write, and only then applied in memory, so a failed write leaves the
//! ledger exactly as it was.

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, AttendanceState, AttendanceStats, StreakPolicy};
use crate::store::Store;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

pub const DEFAULT_LOCATION: &str = "ActiveCore Gym - Main Floor";
pub const DEFAULT_LATE_HOUR: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Copied verbatim into every event.
    pub location: String,
    /// First local hour that counts as `late`.
    pub late_hour: u32,
    pub streak_policy: StreakPolicy,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            late_hour: DEFAULT_LATE_HOUR,
            streak_policy: StreakPolicy::default(),
        }
    }
}

#[derive(Debug)]
pub struct AttendanceLedger {
    settings: LedgerSettings,
    state: AttendanceState,
    log: Vec<AttendanceEvent>,
}

impl AttendanceLedger {
    /// Load the log and the counters from `store`.
    ///
    /// If the stored counters do not describe the stored log under the
    /// configured streak policy (missing row, wrong total, last date or
    /// streak) they are rebuilt from the log and written back. Replaying is idempotent, so this is safe to run on
    /// every start.
    pub fn load<S: Store + ?Sized>(store: &mut S, settings: LedgerSettings) -> AppResult<Self> {
        let log = store.load_log()?;
        let stored = store.load_state()?;

        let state = match stored {
            Some(state) if state.matches_log(&log, settings.streak_policy) => state,
            None if log.is_empty() => AttendanceState::default(),
            other => {
                warn!(
                    stored = ?other,
                    events = log.len(),
                    "attendance counters out of sync with log, rebuilding"
                );
                let rebuilt = AttendanceState::rebuild(&log, settings.streak_policy);
                store
                    .save_state(&rebuilt)
                    .map_err(AppError::into_persistence)?;
                rebuilt
            }
        };

        debug!(
            total = state.total_check_ins,
            streak = state.streak,
            "attendance ledger loaded"
        );

        Ok(Self {
            settings,
            state,
            log,
        })
    }

    /// Record today's check-in at local wall-clock time `now`.
    ///
    /// Fails with `DuplicateCheckIn` when a check-in already exists for
    /// `now`'s calendar date, and with `OutOfOrderCheckIn` when `now` is
    /// earlier than the last recorded day. Neither failure mutates anything.
    pub fn record_check_in<S: Store + ?Sized>(
        &mut self,
        store: &mut S,
        now: NaiveDateTime,
    ) -> AppResult<AttendanceEvent> {
        let date = now.date();

        if let Some(last) = self.state.last_check_in_date {
            if last == date {
                return Err(AppError::DuplicateCheckIn { date });
            }
            if date < last {
                return Err(AppError::OutOfOrderCheckIn { date, last });
            }
        }

        let event = AttendanceEvent::new(
            self.next_id(),
            now,
            &self.settings.location,
            self.settings.late_hour,
        );
        let next_state = self.state.advanced(date, self.settings.streak_policy);

        store
            .commit_check_in(&event, &next_state)
            .map_err(AppError::into_persistence)?;

        self.log.push(event.clone());
        self.state = next_state;

        info!(
            id = event.id,
            date = %event.date,
            status = event.status.to_db_str(),
            total = self.state.total_check_ins,
            streak = self.state.streak,
            "check-in recorded"
        );

        if let Err(e) = store.record_audit(
            "checkin",
            &event.date_str(),
            &format!(
                "Check-in #{} at {} ({})",
                self.state.total_check_ins,
                event.time_str(),
                event.status.to_db_str()
            ),
        ) {
            warn!(error = %e, "failed to write audit log");
        }

        Ok(event)
    }

    /// Up to `limit` events, most recent first.
    pub fn recent_events(&self, limit: usize) -> Vec<AttendanceEvent> {
        self.log.iter().rev().take(limit).cloned().collect()
    }

    /// Events recorded on `date` (at most one).
    pub fn events_on(&self, date: NaiveDate) -> Vec<AttendanceEvent> {
        self.log
            .iter()
            .filter(|ev| ev.date == date)
            .cloned()
            .collect()
    }

    /// Whole log, oldest first.
    pub fn events(&self) -> &[AttendanceEvent] {
        &self.log
    }

    pub fn current_stats(&self) -> AttendanceStats {
        self.state.stats()
    }

    pub fn state(&self) -> &AttendanceState {
        &self.state
    }

    pub fn total_check_ins(&self) -> u32 {
        self.state.total_check_ins
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    fn next_id(&self) -> u64 {
        self.log.iter().map(|ev| ev.id).max().unwrap_or(0) + 1
    }
}
