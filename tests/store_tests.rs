use rcheckin::core::ledger::{AttendanceLedger, LedgerSettings};
use rcheckin::core::rewards::RewardEngine;
use rcheckin::db::migrate::{applied_versions, run_pending_migrations};
use rcheckin::models::{AttendanceEvent, AttendanceState};
use rcheckin::store::Store;
use rcheckin::store::sqlite::SqliteStore;

mod common;
use common::{at, day, setup_test_db};

#[test]
fn test_sqlite_reload_is_identical() {
    let db_path = setup_test_db("store_reload");

    let (state, log, catalog) = {
        let mut store = SqliteStore::open(&db_path).expect("open");
        let mut ledger =
            AttendanceLedger::load(&mut store, LedgerSettings::default()).expect("ledger");
        let mut rewards = RewardEngine::load(&mut store).expect("rewards");

        for a in [
            "2024-01-01 08:00",
            "2024-01-02 09:30",
            "2024-01-03 07:15",
            "2024-01-04 08:00",
            "2024-01-05 10:00",
        ] {
            ledger.record_check_in(&mut store, at(a)).expect("check-in");
        }
        rewards
            .claim(&mut store, "1", ledger.total_check_ins())
            .expect("claim");

        (
            ledger.state().clone(),
            ledger.events().to_vec(),
            rewards.catalog().to_vec(),
        )
    };

    let store = SqliteStore::open(&db_path).expect("reopen");
    assert_eq!(store.load_state().expect("state"), Some(state.clone()));
    assert_eq!(store.load_log().expect("log"), log);
    assert_eq!(store.load_catalog().expect("catalog"), Some(catalog.clone()));

    // a second reload changes nothing
    let mut store = store;
    let ledger = AttendanceLedger::load(&mut store, LedgerSettings::default()).expect("ledger");
    let rewards = RewardEngine::load(&mut store).expect("rewards");
    assert_eq!(ledger.state(), &state);
    assert_eq!(rewards.catalog(), catalog.as_slice());
    assert!(rewards.get("1").expect("reward 1").claimed);
}

#[test]
fn test_commit_is_atomic_on_duplicate_date() {
    let mut store = SqliteStore::in_memory().expect("open");

    let first = AttendanceEvent::new(1, at("2024-01-01 08:00"), "Main Floor", 9);
    let state = AttendanceState::default().advanced(day("2024-01-01"), Default::default());
    store.commit_check_in(&first, &state).expect("first commit");

    // same calendar date under a new id: the unique index rejects it
    let clash = AttendanceEvent::new(2, at("2024-01-01 18:00"), "Main Floor", 9);
    let bumped = state.advanced(day("2024-01-01"), Default::default());
    assert!(store.commit_check_in(&clash, &bumped).is_err());

    assert_eq!(store.load_log().expect("log"), vec![first]);
    assert_eq!(store.load_state().expect("state"), Some(state));
}

#[test]
fn test_fresh_store_has_no_state_or_catalog() {
    let store = SqliteStore::in_memory().expect("open");

    assert!(store.load_log().expect("log").is_empty());
    assert_eq!(store.load_state().expect("state"), None);
    assert_eq!(store.load_catalog().expect("catalog"), None);
}

#[test]
fn test_migrations_are_idempotent() {
    let db_path = setup_test_db("store_migrations");
    let store = SqliteStore::open(&db_path).expect("open");

    let versions = applied_versions(store.conn()).expect("versions");
    assert!(!versions.is_empty());

    let applied = run_pending_migrations(store.conn()).expect("rerun");
    assert_eq!(applied, 0);
    assert_eq!(applied_versions(store.conn()).expect("versions"), versions);
}

#[test]
fn test_audit_rows_written() {
    let mut store = SqliteStore::in_memory().expect("open");
    store
        .record_audit("claim", "1", "Free Protein Shake")
        .expect("audit");

    let rows = rcheckin::db::log::load_log(store.conn()).expect("log rows");
    let row = rows.last().expect("audit row");
    assert_eq!(row.operation, "claim");
    assert_eq!(row.target, "1");
}
