//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError so the CLI can
//! report every failure the same way.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

/// Reasons a reward claim is refused. None of them mutate the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Reward '{0}' not found")]
    NotFound(String),

    #[error("Reward '{id}' requires {required} check-ins (current: {total})")]
    NotEligible { id: String, required: u32, total: u32 },

    #[error("Reward '{0}' has already been claimed")]
    AlreadyClaimed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database / persistence
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Check-in flow
    // ---------------------------
    #[error("Attendance already recorded for {date}")]
    DuplicateCheckIn { date: NaiveDate },

    #[error("Check-in dated {date} is earlier than the last check-in ({last})")]
    OutOfOrderCheckIn { date: NaiveDate, last: NaiveDate },

    #[error("Invalid QR code: {0}")]
    InvalidPayload(String),

    #[error("Scanner unavailable: {0}")]
    ScannerUnavailable(String),

    #[error("No active scan for this ticket")]
    NoActiveScan,

    // ---------------------------
    // Rewards
    // ---------------------------
    #[error(transparent)]
    Claim(#[from] ClaimError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl AppError {
    /// Fold any failed durable write into the `Persistence` variant.
    pub fn into_persistence(self) -> Self {
        match self {
            AppError::Persistence(_) => self,
            other => AppError::Persistence(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
