use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::AttendanceLedger;
use crate::core::rewards::RewardEngine;
use crate::errors::AppResult;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::reward;

/// Handle the `claim` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Claim { id } = cmd {
        let mut store = SqliteStore::open(&cfg.database)?;
        let ledger = AttendanceLedger::load(&mut store, cfg.ledger_settings())?;
        let mut rewards = RewardEngine::load(&mut store)?;

        let claimed = rewards.claim(&mut store, id, ledger.total_check_ins())?;
        reward(format!(
            "Reward claimed: {} (#{}). Show this message at the front desk.",
            claimed.title, claimed.id
        ));
    }

    Ok(())
}
