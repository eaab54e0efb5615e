use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts and date range of a database, as shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInfo {
    pub file_size: u64,
    pub check_ins: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub rewards: i64,
    pub rewards_claimed: i64,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<DbInfo> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let check_ins: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance_log", [], |row| row.get(0))?;

    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_log ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_log ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let (rewards, rewards_claimed): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(claimed), 0) FROM reward_catalog",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(DbInfo {
        file_size,
        check_ins,
        first_date,
        last_date,
        rewards,
        rewards_claimed,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    let info = collect_db_info(pool, db_path)?;
    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Total check-ins:{} {}{}{}",
        CYAN, RESET, GREEN, info.check_ins, RESET
    );

    let fmt_first = info
        .first_date
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = info.last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);
    println!(
        "{}• Rewards claimed:{} {}/{}",
        CYAN, RESET, info.rewards_claimed, info.rewards
    );
    println!();
    Ok(())
}
