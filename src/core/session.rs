//! Session Facade: turns scanner output into check-ins and reward unlocks.
//!
//! State machine:
//!
//! ```text
//! Idle ──begin_scan──▶ Scanning ──payload──▶ Success | Duplicate | Invalid
//!                         │      └─error───▶ ScannerError
//!                         └──stop──▶ Idle
//! any terminal state ──acknowledge──▶ Idle
//! ```
//!
//! Two ways to drive it: the split-phase calls (`begin_scan`,
//! `deliver_payload`, `deliver_scanner_error`, `stop_scan`) for callers that
//! own the capture loop, or `scan()`, which runs the scanner itself under a
//! timeout and a cancellation signal.

use crate::core::clock::Clock;
use crate::core::ledger::{AttendanceLedger, LedgerSettings};
use crate::core::payload::{DEFAULT_CHECKIN_PREFIX, validate_payload};
use crate::core::rewards::RewardEngine;
use crate::core::scanner::{CaptureGuard, Scanner};
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, AttendanceStats, Reward};
use crate::store::Store;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub checkin_prefix: String,
    pub scan_timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            checkin_prefix: DEFAULT_CHECKIN_PREFIX.to_string(),
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Success,
    Duplicate,
    Invalid,
    ScannerError,
}

/// Everything the presentation layer needs to know about an attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Success {
        event: AttendanceEvent,
        stats: AttendanceStats,
    },
    Duplicate,
    Invalid,
    ScannerError {
        reason: String,
    },
    RewardUnlocked {
        reward: Reward,
    },
    Cancelled,
}

/// Identifies one scan. Results delivered with a superseded ticket are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(u64);

/// Cancels the scan currently driven by [`SessionFacade::scan`].
#[derive(Debug, Clone)]
pub struct ScanCanceller {
    signal: Arc<watch::Sender<bool>>,
}

impl ScanCanceller {
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }
}

enum Capture {
    Payload(String),
    Failed(String),
    Cancelled,
}

pub struct SessionFacade<St: Store, Sc: Scanner, C: Clock> {
    store: St,
    ledger: AttendanceLedger,
    rewards: RewardEngine,
    scanner: Sc,
    clock: C,
    settings: SessionSettings,
    state: SessionState,
    ticket: u64,
    cancel: Arc<watch::Sender<bool>>,
}

impl<St: Store, Sc: Scanner, C: Clock> SessionFacade<St, Sc, C> {
    /// Load ledger and catalog from `store` (seeding the catalog if needed).
    pub fn open(
        mut store: St,
        scanner: Sc,
        clock: C,
        ledger_settings: LedgerSettings,
        settings: SessionSettings,
    ) -> AppResult<Self> {
        let ledger = AttendanceLedger::load(&mut store, ledger_settings)?;
        let rewards = RewardEngine::load(&mut store)?;
        let (cancel, _) = watch::channel(false);

        Ok(Self {
            store,
            ledger,
            rewards,
            scanner,
            clock,
            settings,
            state: SessionState::Idle,
            ticket: 0,
            cancel: Arc::new(cancel),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ledger(&self) -> &AttendanceLedger {
        &self.ledger
    }

    pub fn rewards(&self) -> &RewardEngine {
        &self.rewards
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut St {
        &mut self.store
    }

    pub fn scanner(&self) -> &Sc {
        &self.scanner
    }

    pub fn into_store(self) -> St {
        self.store
    }

    pub fn stats(&self) -> AttendanceStats {
        self.ledger.current_stats()
    }

    pub fn canceller(&self) -> ScanCanceller {
        ScanCanceller {
            signal: Arc::clone(&self.cancel),
        }
    }

    /// Enter `Scanning`. An active scan is stopped and its ticket superseded.
    pub fn begin_scan(&mut self) -> ScanTicket {
        if self.state == SessionState::Scanning {
            warn!(ticket = self.ticket, "new scan requested, cancelling the active one");
            self.scanner.stop_scan();
        }

        self.ticket += 1;
        self.state = SessionState::Scanning;
        self.cancel.send_replace(false);
        debug!(ticket = self.ticket, "scan started");
        ScanTicket(self.ticket)
    }

    /// Deliver the payload captured for `ticket`.
    pub fn deliver_payload(
        &mut self,
        ticket: ScanTicket,
        payload: &str,
    ) -> AppResult<Vec<SessionEvent>> {
        self.ensure_active(ticket)?;
        self.scanner.stop_scan();

        if let Err(e) = validate_payload(payload, &self.settings.checkin_prefix) {
            debug!(error = %e, "payload rejected");
            self.state = SessionState::Invalid;
            return Ok(vec![SessionEvent::Invalid]);
        }

        self.record_and_evaluate()
    }

    /// Deliver a capture failure (camera missing, permission denied, ...).
    pub fn deliver_scanner_error(
        &mut self,
        ticket: ScanTicket,
        reason: &str,
    ) -> AppResult<Vec<SessionEvent>> {
        self.ensure_active(ticket)?;
        self.scanner.stop_scan();

        warn!(reason, "scan aborted");
        self.state = SessionState::ScannerError;
        Ok(vec![SessionEvent::ScannerError {
            reason: reason.to_string(),
        }])
    }

    /// Stop the active scan, if any. Never touches attendance state.
    pub fn stop_scan(&mut self) {
        self.cancel.send_replace(true);
        self.scanner.stop_scan();
        if self.state == SessionState::Scanning {
            debug!(ticket = self.ticket, "scan stopped");
            self.state = SessionState::Idle;
        }
    }

    /// Leave a terminal state.
    pub fn acknowledge(&mut self) {
        if self.state != SessionState::Scanning {
            self.state = SessionState::Idle;
        }
    }

    /// Check in without scanning (front-desk / demo path).
    pub fn check_in(&mut self) -> AppResult<Vec<SessionEvent>> {
        if self.state == SessionState::Scanning {
            self.stop_scan();
        }
        self.record_and_evaluate()
    }

    /// Claim a reward against the current attendance total.
    pub fn claim(&mut self, reward_id: &str) -> AppResult<Reward> {
        let total = self.ledger.total_check_ins();
        self.rewards.claim(&mut self.store, reward_id, total)
    }

    /// Run one complete scan: capture under the configured timeout, then
    /// process the payload. The capture is released on every exit path,
    /// including this future being dropped.
    pub async fn scan(&mut self) -> AppResult<Vec<SessionEvent>> {
        let ticket = self.begin_scan();
        let timeout = self.settings.scan_timeout;
        let mut cancelled = self.cancel.subscribe();

        let capture = {
            let mut guard = CaptureGuard::acquire(&mut self.scanner);

            tokio::select! {
                res = tokio::time::timeout(timeout, guard.scanner().start_scan()) => match res {
                    Ok(Ok(payload)) => Capture::Payload(payload),
                    Ok(Err(AppError::ScannerUnavailable(reason))) => Capture::Failed(reason),
                    Ok(Err(e)) => Capture::Failed(e.to_string()),
                    Err(_) => Capture::Failed(format!(
                        "no QR code detected within {} s",
                        timeout.as_secs_f64()
                    )),
                },
                _ = cancelled.wait_for(|c| *c) => Capture::Cancelled,
            }
        };

        match capture {
            Capture::Payload(payload) => self.deliver_payload(ticket, &payload),
            Capture::Failed(reason) => self.deliver_scanner_error(ticket, &reason),
            Capture::Cancelled => {
                if self.state == SessionState::Scanning {
                    self.state = SessionState::Idle;
                }
                debug!(ticket = ticket.0, "scan cancelled");
                Ok(vec![SessionEvent::Cancelled])
            }
        }
    }

    fn ensure_active(&self, ticket: ScanTicket) -> AppResult<()> {
        if self.state == SessionState::Scanning && ticket.0 == self.ticket {
            Ok(())
        } else {
            Err(AppError::NoActiveScan)
        }
    }

    /// Ledger first, rewards second: the engine always sees the new total.
    fn record_and_evaluate(&mut self) -> AppResult<Vec<SessionEvent>> {
        let now = self.clock.now();

        match self.ledger.record_check_in(&mut self.store, now) {
            Ok(event) => {
                let stats = self.ledger.current_stats();
                let mut events = vec![SessionEvent::Success { event, stats }];

                if let Some(reward) = self.rewards.on_attendance_increased(stats.total_check_ins) {
                    events.push(SessionEvent::RewardUnlocked { reward });
                }

                self.state = SessionState::Success;
                Ok(events)
            }
            Err(AppError::DuplicateCheckIn { date }) => {
                debug!(%date, "duplicate check-in");
                self.state = SessionState::Duplicate;
                Ok(vec![SessionEvent::Duplicate])
            }
            Err(e) => {
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }
}
