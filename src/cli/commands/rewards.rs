use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::core::rewards::RewardEngine;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_availability};
use unicode_width::UnicodeWidthStr;

const DESCRIPTION_WIDTH: usize = 64;

/// Handle the `rewards` command: the catalog with each reward's standing.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = SqliteStore::open(&cfg.database)?;
    let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;
    let rewards = RewardEngine::load(&mut store)?;
    let total = ledger.total_check_ins();

    header(format!("Rewards ({} check-ins)", total));

    let title_w = rewards
        .catalog()
        .iter()
        .map(|r| r.title.width())
        .max()
        .unwrap_or(0);

    for r in rewards.catalog() {
        let availability = r.availability(total);
        let label = format!("{:?}", availability).to_uppercase();
        let pad = " ".repeat(title_w.saturating_sub(r.title.width()));

        println!(
            "{}{:<9}{} #{:<3} {}{}  {:>3} check-ins  {:>3} pts  {}",
            color_for_availability(availability),
            label,
            RESET,
            r.id,
            r.title,
            pad,
            r.required_attendance,
            r.points,
            r.category.to_db_str()
        );

        let opts = textwrap::Options::new(DESCRIPTION_WIDTH)
            .initial_indent("               ")
            .subsequent_indent("               ");
        println!("{}{}{}", GREY, textwrap::fill(&r.description, opts), RESET);
    }
    println!();

    Ok(())
}
