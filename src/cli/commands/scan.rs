use super::{parse_at, report};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, LocalClock};
use crate::core::scanner::{Scanner, SimulatedScanner, StaticScanner, UnavailableScanner};
use crate::core::session::{SessionFacade, SessionSettings};
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::info;
use chrono::NaiveDateTime;
use std::time::Duration;

/// Handle the `scan` command.
///
/// Without `--payload` the simulated camera is used; it "detects" the gym
/// code after `simulated_scan_delay_ms`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan {
        payload,
        at,
        timeout,
        unavailable,
    } = cmd
    {
        let now = parse_at(at.as_deref())?;

        let mut settings = cfg.session_settings();
        if let Some(secs) = timeout {
            settings.scan_timeout = Duration::from_secs(*secs);
        }

        match payload {
            Some(p) => with_clock(cfg, StaticScanner::new(p), now, settings),
            None if *unavailable => with_clock(
                cfg,
                UnavailableScanner::new("no camera available on this device"),
                now,
                settings,
            ),
            None => with_clock(
                cfg,
                SimulatedScanner::new(
                    &cfg.checkin_prefix,
                    Duration::from_millis(cfg.simulated_scan_delay_ms),
                ),
                now,
                settings,
            ),
        }?;
    }

    Ok(())
}

fn with_clock<Sc: Scanner>(
    cfg: &Config,
    scanner: Sc,
    now: Option<NaiveDateTime>,
    settings: SessionSettings,
) -> AppResult<()> {
    match now {
        Some(now) => run_scan(cfg, scanner, FixedClock::new(now), settings),
        None => run_scan(cfg, scanner, LocalClock, settings),
    }
}

fn run_scan<Sc: Scanner, C: Clock>(
    cfg: &Config,
    scanner: Sc,
    clock: C,
    settings: SessionSettings,
) -> AppResult<()> {
    let store = SqliteStore::open(&cfg.database)?;
    let mut facade =
        SessionFacade::open(store, scanner, clock, cfg.ledger_settings(), settings)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    info("Scanning... point the camera at the gym QR code.");
    let events = runtime.block_on(facade.scan())?;

    report(&events)
}
