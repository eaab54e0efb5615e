use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCheckin
/// Gym attendance check-ins and loyalty rewards backed by SQLite
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "A gym check-in CLI: record daily attendance, track streaks and unlock rewards using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record today's check-in without scanning
    Checkin {
        /// Local date and time of the check-in (YYYY-MM-DD HH:MM), defaults to now
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Scan the gym QR code and check in
    Scan {
        /// Use this payload instead of the simulated camera
        #[arg(long = "payload", value_name = "PAYLOAD")]
        payload: Option<String>,

        /// Local date and time of the check-in (YYYY-MM-DD HH:MM), defaults to now
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,

        /// Seconds to wait for a code before giving up
        #[arg(
            long = "timeout",
            value_name = "SECS",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout: Option<u64>,

        /// Behave as if no camera were available
        #[arg(long = "unavailable", conflicts_with = "payload")]
        unavailable: bool,
    },

    /// Show recent check-ins, most recent first
    History {
        #[arg(long = "limit", short = 'n', help = "Number of check-ins to show")]
        limit: Option<usize>,

        #[arg(long = "today", conflicts_with = "date", help = "Show only today's check-in")]
        today: bool,

        #[arg(long = "date", value_name = "YYYY-MM-DD", help = "Show the check-in of a given day")]
        date: Option<String>,
    },

    /// Show streak, total check-ins and progress towards the next reward
    Stats,

    /// List the reward catalog
    Rewards,

    /// Claim an unlocked reward
    Claim {
        /// Reward id as shown by `rewards`
        id: String,
    },

    /// Export the attendance log
    Export {
        #[arg(long, value_enum)]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Overwrite the destination without asking")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a .zip archive")]
        compress: bool,
    },
}
