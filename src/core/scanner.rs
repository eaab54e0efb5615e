//! Scanner Adapter: the only suspending collaborator of a check-in.
//!
//! A scanner owns some capture resource (camera, stdin, ...). It is acquired
//! by `start_scan` and must be released by `stop_scan`, which may be called
//! any number of times.

use crate::core::payload::make_payload;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub trait Scanner {
    /// Acquire the capture resource and wait for one payload.
    fn start_scan(&mut self) -> impl Future<Output = AppResult<String>> + Send;

    /// Release the capture resource. Idempotent.
    fn stop_scan(&mut self);

    fn is_capturing(&self) -> bool;
}

/// Stand-in for the camera: after `delay` it "detects" the gym's code.
#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    prefix: String,
    delay: Duration,
    capturing: bool,
}

impl SimulatedScanner {
    pub fn new(prefix: &str, delay: Duration) -> Self {
        Self {
            prefix: prefix.to_string(),
            delay,
            capturing: false,
        }
    }
}

impl Scanner for SimulatedScanner {
    async fn start_scan(&mut self) -> AppResult<String> {
        self.capturing = true;
        debug!(delay_ms = self.delay.as_millis() as u64, "simulated capture started");
        tokio::time::sleep(self.delay).await;
        Ok(make_payload(&self.prefix, Utc::now().timestamp_millis()))
    }

    fn stop_scan(&mut self) {
        self.capturing = false;
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }
}

/// Yields a payload known up front (e.g. typed on the command line).
#[derive(Debug, Clone)]
pub struct StaticScanner {
    payload: String,
    capturing: bool,
}

impl StaticScanner {
    pub fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            capturing: false,
        }
    }
}

impl Scanner for StaticScanner {
    async fn start_scan(&mut self) -> AppResult<String> {
        self.capturing = true;
        Ok(self.payload.clone())
    }

    fn stop_scan(&mut self) {
        self.capturing = false;
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }
}

/// A device without a usable camera.
#[derive(Debug, Clone)]
pub struct UnavailableScanner {
    reason: String,
}

impl UnavailableScanner {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl Scanner for UnavailableScanner {
    async fn start_scan(&mut self) -> AppResult<String> {
        Err(AppError::ScannerUnavailable(self.reason.clone()))
    }

    fn stop_scan(&mut self) {}

    fn is_capturing(&self) -> bool {
        false
    }
}

/// Holds a scanner for the duration of one capture and releases it on drop,
/// whichever way the capture ends.
pub(crate) struct CaptureGuard<'a, S: Scanner> {
    scanner: &'a mut S,
}

impl<'a, S: Scanner> CaptureGuard<'a, S> {
    pub(crate) fn acquire(scanner: &'a mut S) -> Self {
        Self { scanner }
    }

    pub(crate) fn scanner(&mut self) -> &mut S {
        &mut *self.scanner
    }
}

impl<S: Scanner> Drop for CaptureGuard<'_, S> {
    fn drop(&mut self) {
        self.scanner.stop_scan();
        debug!("capture released");
    }
}
