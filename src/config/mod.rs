use crate::core::ledger::{DEFAULT_LATE_HOUR, DEFAULT_LOCATION, LedgerSettings};
use crate::core::payload::DEFAULT_CHECKIN_PREFIX;
use crate::core::session::SessionSettings;
use crate::errors::{AppError, AppResult};
use crate::models::StreakPolicy;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod migrate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_late_hour")]
    pub late_hour: u32,
    #[serde(default = "default_checkin_prefix")]
    pub checkin_prefix: String,
    #[serde(default = "default_scan_timeout_secs")]
    pub scan_timeout_secs: u64,
    #[serde(default = "default_simulated_scan_delay_ms")]
    pub simulated_scan_delay_ms: u64,
    #[serde(default)]
    pub streak_policy: StreakPolicy,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}
fn default_late_hour() -> u32 {
    DEFAULT_LATE_HOUR
}
fn default_checkin_prefix() -> String {
    DEFAULT_CHECKIN_PREFIX.to_string()
}
fn default_scan_timeout_secs() -> u64 {
    30
}
fn default_simulated_scan_delay_ms() -> u64 {
    3000
}
fn default_recent_limit() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            location: default_location(),
            late_hour: default_late_hour(),
            checkin_prefix: default_checkin_prefix(),
            scan_timeout_secs: default_scan_timeout_secs(),
            simulated_scan_delay_ms: default_simulated_scan_delay_ms(),
            streak_policy: StreakPolicy::default(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rcheckin`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rcheckin")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcheckin.sqlite")
    }

    /// Where a database path from `--db` or the config file points to:
    /// `~/` is expanded, other relative paths live in the config directory.
    pub fn resolve_db_path(raw: &str) -> PathBuf {
        let p = expand_tilde(raw);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load the configuration file, or defaults if it does not exist.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.late_hour > 23 {
            return Err(AppError::Config(format!(
                "late_hour must be between 0 and 23 (got {})",
                self.late_hour
            )));
        }
        if self.checkin_prefix.is_empty() || !self.checkin_prefix.is_ascii() {
            return Err(AppError::Config(
                "checkin_prefix must be a non-empty ASCII string".into(),
            ));
        }
        if self.scan_timeout_secs == 0 {
            return Err(AppError::Config("scan_timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            location: self.location.clone(),
            late_hour: self.late_hour,
            streak_policy: self.streak_policy,
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            checkin_prefix: self.checkin_prefix.clone(),
            scan_timeout: Duration::from_secs(self.scan_timeout_secs),
        }
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
