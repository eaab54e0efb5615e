use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the streak counter reacts to a skipped day.
///
/// `ResetOnGap` restarts the streak at 1 whenever the previous check-in was not
/// on the previous calendar day. `Cumulative` never resets, which makes the
/// streak equal to the lifetime total (legacy behaviour of the mobile app).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    #[default]
    ResetOnGap,
    Cumulative,
}

impl StreakPolicy {
    /// Streak value after a successful check-in on `date`.
    pub fn next_streak(self, previous: Option<NaiveDate>, current: u32, date: NaiveDate) -> u32 {
        match self {
            StreakPolicy::Cumulative => current + 1,
            StreakPolicy::ResetOnGap => match previous {
                Some(prev) if prev.succ_opt() == Some(date) => current + 1,
                _ => 1,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreakPolicy::ResetOnGap => "reset_on_gap",
            StreakPolicy::Cumulative => "cumulative",
        }
    }
}
