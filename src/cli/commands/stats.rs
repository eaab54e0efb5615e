use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::core::rewards::RewardEngine;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};

const BAR_WIDTH: usize = 20;

/// Handle the `stats` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = SqliteStore::open(&cfg.database)?;
    let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;
    let rewards = RewardEngine::load(&mut store)?;

    let stats = ledger.current_stats();
    let last = stats
        .last_check_in_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    header("Attendance");
    println!("{}• Current streak:{} {}{} day(s){}", CYAN, RESET, GREEN, stats.streak, RESET);
    println!("{}• Total check-ins:{} {}{}{}", CYAN, RESET, GREEN, stats.total_check_ins, RESET);
    println!("{}• Last check-in:{} {}", CYAN, RESET, last);
    println!(
        "{}• Rewards claimed:{} {}/{}",
        CYAN,
        RESET,
        rewards.claimed_count(),
        rewards.catalog().len()
    );

    match rewards.progress(stats.total_check_ins) {
        Some(p) => {
            let filled = ((p.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            println!(
                "{}• Next reward:{} {}{}{} ({} check-ins)",
                CYAN, RESET, YELLOW, p.reward.title, RESET, p.reward.required_attendance
            );
            println!(
                "    [{}{}] {}/{} ({:.0}%), {} to go",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                p.current,
                p.reward.required_attendance,
                p.percent,
                p.remaining
            );
        }
        None => println!("{}• Next reward:{} all rewards unlocked", CYAN, RESET),
    }
    println!();

    Ok(())
}
