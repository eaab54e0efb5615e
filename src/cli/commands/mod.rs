pub mod backup;
pub mod checkin;
pub mod claim;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod rewards;
pub mod scan;
pub mod stats;

use crate::core::session::SessionEvent;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, reward, success, warning};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date::parse_datetime;
use chrono::NaiveDateTime;

/// Parse the `--at` option of `checkin` / `scan`.
pub(crate) fn parse_at(at: Option<&str>) -> AppResult<Option<NaiveDateTime>> {
    match at {
        None => Ok(None),
        Some(s) => parse_datetime(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// Print the outcome of a check-in attempt. A scanner failure is not printed
/// here: it is returned so the process exits with an error.
pub(crate) fn report(events: &[SessionEvent]) -> AppResult<()> {
    for ev in events {
        match ev {
            SessionEvent::Success { event, stats } => {
                success(format!(
                    "Checked in on {} at {} {}({}){} - {}",
                    event.date_str(),
                    event.time_str(),
                    color_for_status(event.status),
                    event.status.to_db_str(),
                    RESET,
                    event.location
                ));
                info(format!(
                    "Streak: {} day(s) | Total check-ins: {}",
                    stats.streak, stats.total_check_ins
                ));
            }
            SessionEvent::RewardUnlocked { reward: r } => {
                reward(format!(
                    "Reward unlocked: {} (#{}). Claim it with `rcheckin claim {}`",
                    r.title, r.id, r.id
                ));
            }
            SessionEvent::Duplicate => {
                warning("You have already checked in today.");
            }
            SessionEvent::Invalid => {
                warning("Invalid QR code. Please scan the official gym check-in code.");
            }
            SessionEvent::Cancelled => {
                warning("Scan cancelled.");
            }
            SessionEvent::ScannerError { reason } => {
                return Err(AppError::ScannerUnavailable(reason.clone()));
            }
        }
    }
    Ok(())
}
