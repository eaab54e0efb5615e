use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::errors::{AppError, AppResult};
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::{header, info};
use crate::utils::date::{parse_date, today};
use crate::utils::table::Table;

/// Handle the `history` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { limit, today: only_today, date } = cmd {
        let mut store = SqliteStore::open(&cfg.database)?;
        let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;

        let (title, events) = if *only_today {
            let d = today();
            (format!("Check-in of {}", d), ledger.events_on(d))
        } else if let Some(s) = date {
            let d = parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?;
            (format!("Check-in of {}", d), ledger.events_on(d))
        } else {
            let n = limit.unwrap_or(cfg.recent_limit);
            ("Recent check-ins".to_string(), ledger.recent_events(n))
        };

        header(title);

        if events.is_empty() {
            info("No check-ins found.");
            return Ok(());
        }

        let mut table = Table::new(&["ID", "DATE", "TIME", "STATUS", "LOCATION"]);
        for ev in &events {
            table.add_row(vec![
                ev.id.to_string(),
                ev.date_str(),
                ev.time_str(),
                ev.status.to_db_str().to_string(),
                ev.location.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
