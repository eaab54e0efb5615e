//! Diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG`
//! (default `rcheckin=warn`). User-facing output stays on stdout via
//! `ui::messages`, and the audit trail lives in the database `log` table.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "rcheckin=warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init();
}
