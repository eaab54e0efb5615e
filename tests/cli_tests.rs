use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{VALID_PAYLOAD, checkin_at, init_db, rci, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rci()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("6 rewards in catalog"));

    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_checkin_duplicate_and_next_day() {
    let db_path = setup_test_db("cli_checkin_flow");
    init_db(&db_path);

    rci()
        .args(["--db", &db_path, "checkin", "--at", "2024-01-10 08:30"])
        .assert()
        .success()
        .stdout(contains("2024-01-10"))
        .stdout(contains("present"));

    rci()
        .args(["--db", &db_path, "checkin", "--at", "2024-01-10 09:15"])
        .assert()
        .failure()
        .stdout(contains("already checked in"))
        .stderr(contains("Attendance already recorded for 2024-01-10"));

    rci()
        .args(["--db", &db_path, "checkin", "--at", "2024-01-11 07:00"])
        .assert()
        .success()
        .stdout(contains("Total check-ins: 2"));
}

#[test]
fn test_checkin_late_after_nine() {
    let db_path = setup_test_db("cli_checkin_late");
    init_db(&db_path);

    rci()
        .args(["--db", &db_path, "checkin", "--at", "2024-01-10 09:00"])
        .assert()
        .success()
        .stdout(contains("late"));
}

#[test]
fn test_checkin_rejects_bad_datetime() {
    let db_path = setup_test_db("cli_checkin_bad_at");
    init_db(&db_path);

    rci()
        .args(["--db", &db_path, "checkin", "--at", "yesterday morning"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_history_and_stats() {
    let db_path = setup_test_db("cli_history");
    init_db(&db_path);
    for at in ["2024-01-10 08:30", "2024-01-11 07:00", "2024-01-12 10:00"] {
        checkin_at(&db_path, at);
    }

    rci()
        .args(["--db", &db_path, "history", "--limit", "2"])
        .assert()
        .success()
        .stdout(contains("2024-01-12"))
        .stdout(contains("2024-01-11"))
        .stdout(contains("2024-01-10").not());

    rci()
        .args(["--db", &db_path, "history", "--date", "2024-01-10"])
        .assert()
        .success()
        .stdout(contains("08:30:00"))
        .stdout(contains("2024-01-11").not());

    rci()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Total check-ins"))
        .stdout(contains("Free Protein Shake"))
        .stdout(contains("2 to go"));
}

#[test]
fn test_reward_unlock_and_claim() {
    let db_path = setup_test_db("cli_rewards");
    init_db(&db_path);

    for d in 1..=4 {
        checkin_at(&db_path, &format!("2024-02-{d:02} 08:00"));
    }

    rci()
        .args(["--db", &db_path, "claim", "1"])
        .assert()
        .failure()
        .stderr(contains("requires 5 check-ins"));

    rci()
        .args(["--db", &db_path, "checkin", "--at", "2024-02-05 08:00"])
        .assert()
        .success()
        .stdout(contains("Reward unlocked: Free Protein Shake"));

    rci()
        .args(["--db", &db_path, "claim", "1"])
        .assert()
        .success()
        .stdout(contains("Reward claimed: Free Protein Shake"));

    rci()
        .args(["--db", &db_path, "claim", "1"])
        .assert()
        .failure()
        .stderr(contains("already been claimed"));

    rci()
        .args(["--db", &db_path, "claim", "42"])
        .assert()
        .failure()
        .stderr(contains("not found"));

    rci()
        .args(["--db", &db_path, "rewards"])
        .assert()
        .success()
        .stdout(contains("CLAIMED"))
        .stdout(contains("Free Personal Training Session"));
}

#[test]
fn test_scan_outcomes() {
    let db_path = setup_test_db("cli_scan");
    init_db(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "scan",
            "--payload",
            "https://example.com/menu",
            "--at",
            "2024-03-01 08:00",
        ])
        .assert()
        .success()
        .stdout(contains("Invalid QR code"));

    rci()
        .args([
            "--db",
            &db_path,
            "scan",
            "--payload",
            VALID_PAYLOAD,
            "--at",
            "2024-03-01 08:00",
        ])
        .assert()
        .success()
        .stdout(contains("Checked in on 2024-03-01"));

    rci()
        .args([
            "--db",
            &db_path,
            "scan",
            "--payload",
            VALID_PAYLOAD,
            "--at",
            "2024-03-01 18:00",
        ])
        .assert()
        .success()
        .stdout(contains("already checked in"));

    rci()
        .args(["--db", &db_path, "scan", "--unavailable"])
        .assert()
        .failure()
        .stderr(contains("Scanner unavailable"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init_db(&db_path);
    checkin_at(&db_path, "2024-01-10 08:30");
    checkin_at(&db_path, "2024-01-11 09:45");

    let csv_out = temp_out("cli_export", "csv");
    rci()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("csv written");
    assert!(content.starts_with("id,date,time,location,status"));
    assert!(content.contains("2024-01-10,08:30:00"));
    assert!(content.contains("late"));

    let json_out = temp_out("cli_export", "json");
    rci()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &json_out, "--force",
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("json written"))
            .expect("valid json");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["status"], "present");

    rci()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("checkin"))
        .stdout(contains("export"));
}

#[test]
fn test_db_info_and_backup() {
    let db_path = setup_test_db("cli_db");
    init_db(&db_path);
    checkin_at(&db_path, "2024-01-10 08:30");

    rci()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total check-ins"))
        .stdout(contains("Integrity check passed"));

    let backup = temp_out("cli_db_backup", "sqlite");
    rci()
        .args(["--db", &db_path, "backup", "--file", &backup])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&backup).exists());

    let zipped = temp_out("cli_db_backup_zip", "sqlite");
    let zip_path = Path::new(&zipped).with_extension("zip");
    fs::remove_file(&zip_path).ok();
    rci()
        .args(["--db", &db_path, "backup", "--file", &zipped, "--compress"])
        .assert()
        .success();
    assert!(zip_path.exists());
    assert!(!Path::new(&zipped).exists());
}

#[test]
fn test_scan_rejects_zero_timeout() {
    let db_path = setup_test_db("cli_scan_zero_timeout");
    init_db(&db_path);

    rci()
        .args([
            "--db",
            &db_path,
            "scan",
            "--payload",
            VALID_PAYLOAD,
            "--timeout",
            "0",
        ])
        .assert()
        .failure()
        .stderr(contains("--timeout"));
}

#[test]
fn test_relative_db_path_shared_by_init_and_checkin() {
    let root = std::env::temp_dir().join("cli_relative_db");
    fs::remove_dir_all(&root).ok();
    let home = root.join("home");
    let cwd = root.join("cwd");
    fs::create_dir_all(&home).expect("home dir");
    fs::create_dir_all(&cwd).expect("cwd dir");

    rci()
        .env("HOME", &home)
        .current_dir(&cwd)
        .args(["--db", "gym.sqlite", "--test", "init"])
        .assert()
        .success();

    rci()
        .env("HOME", &home)
        .current_dir(&cwd)
        .args(["--db", "gym.sqlite", "checkin", "--at", "2024-01-10 08:30"])
        .assert()
        .success();

    assert!(home.join(".rcheckin").join("gym.sqlite").exists());
    assert!(!cwd.join("gym.sqlite").exists());

    // the check-in landed in the database `init` created
    rci()
        .env("HOME", &home)
        .current_dir(&cwd)
        .args(["--db", "gym.sqlite", "history"])
        .assert()
        .success()
        .stdout(contains("2024-01-10"));
}
