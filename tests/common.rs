#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const VALID_PAYLOAD: &str = "ACTIVECORE_GYM_CHECKIN_1704875400000";

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a test DB through the CLI
pub fn init_db(db_path: &str) {
    rci()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Check in through the CLI at a fixed local time ("YYYY-MM-DD HH:MM")
pub fn checkin_at(db_path: &str, at: &str) {
    rci()
        .args(["--db", db_path, "checkin", "--at", at])
        .assert()
        .success();
}

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("valid datetime")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}
