//! Check-in QR payloads: `<prefix><anything ASCII>`.

use crate::errors::{AppError, AppResult};

pub const DEFAULT_CHECKIN_PREFIX: &str = "ACTIVECORE_GYM_CHECKIN_";

pub fn validate_payload(payload: &str, prefix: &str) -> AppResult<()> {
    if !prefix.is_empty() && payload.is_ascii() && payload.starts_with(prefix) {
        Ok(())
    } else {
        Err(AppError::InvalidPayload(
            "please scan the gym's attendance QR code".into(),
        ))
    }
}

/// Payload printed on the gym's check-in QR code.
pub fn make_payload(prefix: &str, nonce: i64) -> String {
    format!("{prefix}{nonce}")
}
