//! Configuration file upgrades: report and fill in fields that older
//! versions of the file do not carry.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every key a complete configuration file contains.
pub const CONFIG_FIELDS: &[&str] = &[
    "database",
    "location",
    "late_hour",
    "checkin_prefix",
    "scan_timeout_secs",
    "simulated_scan_delay_ms",
    "streak_policy",
    "recent_limit",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Fields missing from the configuration file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(CONFIG_FIELDS
        .iter()
        .copied()
        .filter(|f| !map.contains_key(Value::String((*f).to_string())))
        .collect())
}

/// Add every missing field with its default value, leaving existing values
/// untouched. Returns the fields that were added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;

    let defaults = match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => m,
        _ => return Err(AppError::Config("cannot serialize defaults".into())),
    };

    let mut added = Vec::new();
    for field in CONFIG_FIELDS {
        let key = Value::String((*field).to_string());
        if !map.contains_key(&key)
            && let Some(default) = defaults.get(&key)
        {
            map.insert(key, default.clone());
            added.push(*field);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
