use super::{parse_at, report};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, LocalClock};
use crate::core::scanner::UnavailableScanner;
use crate::core::session::{SessionEvent, SessionFacade};
use crate::errors::{AppError, AppResult};
use crate::store::sqlite::SqliteStore;

/// Handle the `checkin` command: a front-desk check-in with no scan.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { at } = cmd {
        match parse_at(at.as_deref())? {
            Some(now) => check_in(cfg, FixedClock::new(now)),
            None => check_in(cfg, LocalClock),
        }?;
    }

    Ok(())
}

fn check_in<C: Clock>(cfg: &Config, clock: C) -> AppResult<()> {
    let date = clock.now().date();
    let store = SqliteStore::open(&cfg.database)?;
    let scanner = UnavailableScanner::new("direct check-in does not use the camera");

    let mut facade = SessionFacade::open(
        store,
        scanner,
        clock,
        cfg.ledger_settings(),
        cfg.session_settings(),
    )?;

    let events = facade.check_in()?;
    report(&events)?;

    if events.contains(&SessionEvent::Duplicate) {
        return Err(AppError::DuplicateCheckIn { date });
    }
    Ok(())
}
