use super::attendance_event::AttendanceEvent;
use super::streak_policy::StreakPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted counters derived from the attendance log.
/// Only a successful check-in moves them, and never backwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceState {
    pub last_check_in_date: Option<NaiveDate>,
    pub streak: u32,
    pub total_check_ins: u32,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub streak: u32,
    pub total_check_ins: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

impl AttendanceState {
    /// State after one more check-in on `date`. `self` is left untouched.
    pub fn advanced(&self, date: NaiveDate, policy: StreakPolicy) -> Self {
        Self {
            last_check_in_date: Some(date),
            streak: policy.next_streak(self.last_check_in_date, self.streak, date),
            total_check_ins: self.total_check_ins + 1,
        }
    }

    /// Replay a log (oldest first) into the counters it implies.
    pub fn rebuild(log: &[AttendanceEvent], policy: StreakPolicy) -> Self {
        log.iter()
            .fold(Self::default(), |state, ev| state.advanced(ev.date, policy))
    }

    /// True when these counters are exactly what replaying `log` under
    /// `policy` yields, streak included.
    pub fn matches_log(&self, log: &[AttendanceEvent], policy: StreakPolicy) -> bool {
        *self == Self::rebuild(log, policy)
    }

    pub fn stats(&self) -> AttendanceStats {
        AttendanceStats {
            streak: self.streak,
            total_check_ins: self.total_check_ins,
            last_check_in_date: self.last_check_in_date,
        }
    }
}
