pub mod backup;
pub mod clock;
pub mod export;
pub mod ledger;
pub mod log;
pub mod payload;
pub mod rewards;
pub mod scanner;
pub mod session;
