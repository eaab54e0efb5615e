use rcheckin::config::Config;
use rcheckin::config::migrate::{CONFIG_FIELDS, migrate_config_file, missing_fields};
use rcheckin::errors::AppError;
use rcheckin::models::StreakPolicy;
use std::fs;
use std::path::Path;
use std::time::Duration;

mod common;
use common::temp_out;

#[test]
fn test_missing_file_yields_defaults() {
    let path = temp_out("config_missing", "conf");
    let cfg = Config::load_from(Path::new(&path)).expect("defaults");

    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.late_hour, 9);
    assert_eq!(cfg.checkin_prefix, "ACTIVECORE_GYM_CHECKIN_");
    assert_eq!(cfg.streak_policy, StreakPolicy::ResetOnGap);
    assert_eq!(cfg.session_settings().scan_timeout, Duration::from_secs(30));
}

#[test]
fn test_save_then_load() {
    let path = temp_out("config_roundtrip", "conf");
    let cfg = Config {
        location: "Riverside Club".into(),
        late_hour: 7,
        streak_policy: StreakPolicy::Cumulative,
        ..Config::default()
    };
    cfg.save_to(Path::new(&path)).expect("save");

    let loaded = Config::load_from(Path::new(&path)).expect("load");
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.ledger_settings().location, "Riverside Club");
}

#[test]
fn test_partial_file_uses_field_defaults() {
    let path = temp_out("config_partial", "conf");
    fs::write(&path, "late_hour: 10\nstreak_policy: cumulative\n").expect("write");

    let cfg = Config::load_from(Path::new(&path)).expect("load");
    assert_eq!(cfg.late_hour, 10);
    assert_eq!(cfg.streak_policy, StreakPolicy::Cumulative);
    assert_eq!(cfg.recent_limit, 3);
}

#[test]
fn test_invalid_values_rejected() {
    let path = temp_out("config_invalid", "conf");
    fs::write(&path, "late_hour: 24\n").expect("write");

    let err = Config::load_from(Path::new(&path)).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    let cfg = Config {
        scan_timeout_secs: 0,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_migrate_adds_only_missing_fields() {
    let path = temp_out("config_migrate", "conf");
    fs::write(&path, "location: Harbour Gym\nlate_hour: 8\n").expect("write");

    let missing = missing_fields(Path::new(&path)).expect("check");
    assert_eq!(missing.len(), CONFIG_FIELDS.len() - 2);

    let added = migrate_config_file(Path::new(&path)).expect("migrate");
    assert_eq!(added, missing);
    assert!(missing_fields(Path::new(&path)).expect("recheck").is_empty());

    let cfg = Config::load_from(Path::new(&path)).expect("load");
    assert_eq!(cfg.location, "Harbour Gym");
    assert_eq!(cfg.late_hour, 8);

    assert!(migrate_config_file(Path::new(&path)).expect("again").is_empty());
}

#[test]
fn test_relative_db_path_resolves_into_config_dir() {
    assert_eq!(
        Config::resolve_db_path("gym.sqlite"),
        Config::config_dir().join("gym.sqlite")
    );

    let absolute = std::env::temp_dir().join("absolute_gym.sqlite");
    let raw = absolute.to_string_lossy().to_string();
    assert_eq!(Config::resolve_db_path(&raw), absolute);
}
