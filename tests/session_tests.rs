use rcheckin::core::clock::FixedClock;
use rcheckin::core::ledger::LedgerSettings;
use rcheckin::core::scanner::{Scanner, StaticScanner, UnavailableScanner};
use rcheckin::core::session::{SessionEvent, SessionFacade, SessionSettings, SessionState};
use rcheckin::errors::{AppError, AppResult};
use rcheckin::models::AttendanceStatus;
use rcheckin::store::memory::MemoryStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

mod common;
use common::{VALID_PAYLOAD, at};

/// Scanner that never detects anything, recording capture and release.
#[derive(Clone, Default)]
struct PendingScanner {
    capturing: Arc<AtomicBool>,
    stops: Arc<AtomicUsize>,
}

impl Scanner for PendingScanner {
    async fn start_scan(&mut self) -> AppResult<String> {
        self.capturing.store(true, Ordering::SeqCst);
        std::future::pending::<AppResult<String>>().await
    }

    fn stop_scan(&mut self) {
        self.capturing.store(false, Ordering::SeqCst);
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }
}

fn settings(timeout: Duration) -> SessionSettings {
    SessionSettings {
        scan_timeout: timeout,
        ..SessionSettings::default()
    }
}

fn facade<Sc: Scanner>(
    scanner: Sc,
    clock: FixedClock,
) -> SessionFacade<MemoryStore, Sc, FixedClock> {
    SessionFacade::open(
        MemoryStore::new(),
        scanner,
        clock,
        LedgerSettings::default(),
        SessionSettings::default(),
    )
    .expect("open facade")
}

#[tokio::test]
async fn test_scan_valid_payload_records_checkin() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(StaticScanner::new(VALID_PAYLOAD), clock);

    let events = f.scan().await.expect("scan");

    assert_eq!(f.state(), SessionState::Success);
    match &events[..] {
        [SessionEvent::Success { event, stats }] => {
            assert_eq!(event.status, AttendanceStatus::Present);
            assert_eq!(stats.total_check_ins, 1);
            assert_eq!(stats.streak, 1);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert!(!f.scanner().is_capturing());
    assert_eq!(f.store().log().len(), 1);
}

#[tokio::test]
async fn test_scan_same_day_twice_is_duplicate() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(StaticScanner::new(VALID_PAYLOAD), clock.clone());

    f.scan().await.expect("first scan");
    f.acknowledge();
    assert_eq!(f.state(), SessionState::Idle);

    clock.set(at("2024-01-10 09:15"));
    let events = f.scan().await.expect("second scan");

    assert_eq!(events, vec![SessionEvent::Duplicate]);
    assert_eq!(f.state(), SessionState::Duplicate);
    assert_eq!(f.stats().total_check_ins, 1);
}

#[tokio::test]
async fn test_scan_foreign_payload_is_invalid() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(StaticScanner::new("https://example.com/menu"), clock);

    let events = f.scan().await.expect("scan");

    assert_eq!(events, vec![SessionEvent::Invalid]);
    assert_eq!(f.state(), SessionState::Invalid);
    assert_eq!(f.stats().total_check_ins, 0);
    assert!(f.store().log().is_empty());
}

#[tokio::test]
async fn test_scan_without_camera_reports_scanner_error() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(UnavailableScanner::new("camera permission denied"), clock);

    let events = f.scan().await.expect("scan");

    assert_eq!(
        events,
        vec![SessionEvent::ScannerError {
            reason: "camera permission denied".into()
        }]
    );
    assert_eq!(f.state(), SessionState::ScannerError);
    assert_eq!(f.stats().total_check_ins, 0);
}

#[tokio::test]
async fn test_scan_times_out_and_releases_scanner() {
    let scanner = PendingScanner::default();
    let capturing = Arc::clone(&scanner.capturing);
    let mut f = SessionFacade::open(
        MemoryStore::new(),
        scanner,
        FixedClock::new(at("2024-01-10 08:30")),
        LedgerSettings::default(),
        settings(Duration::from_millis(50)),
    )
    .expect("open facade");

    let events = f.scan().await.expect("scan");

    match &events[..] {
        [SessionEvent::ScannerError { reason }] => assert!(reason.contains("no QR code")),
        other => panic!("unexpected events: {other:?}"),
    }
    assert!(!capturing.load(Ordering::SeqCst));
    assert_eq!(f.stats().total_check_ins, 0);
}

#[tokio::test]
async fn test_cancel_scan_returns_to_idle() {
    let scanner = PendingScanner::default();
    let capturing = Arc::clone(&scanner.capturing);
    let mut f = SessionFacade::open(
        MemoryStore::new(),
        scanner,
        FixedClock::new(at("2024-01-10 08:30")),
        LedgerSettings::default(),
        settings(Duration::from_secs(30)),
    )
    .expect("open facade");
    let canceller = f.canceller();

    let cancel = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    };
    let (events, _) = tokio::join!(f.scan(), cancel);

    assert_eq!(events.expect("scan"), vec![SessionEvent::Cancelled]);
    assert_eq!(f.state(), SessionState::Idle);
    assert!(!capturing.load(Ordering::SeqCst));
    assert_eq!(f.stats().total_check_ins, 0);
}

#[tokio::test]
async fn test_dropped_scan_releases_scanner() {
    let scanner = PendingScanner::default();
    let capturing = Arc::clone(&scanner.capturing);
    let stops = Arc::clone(&scanner.stops);
    let mut f = SessionFacade::open(
        MemoryStore::new(),
        scanner,
        FixedClock::new(at("2024-01-10 08:30")),
        LedgerSettings::default(),
        settings(Duration::from_secs(30)),
    )
    .expect("open facade");

    let res = tokio::time::timeout(Duration::from_millis(20), f.scan()).await;
    assert!(res.is_err());
    assert!(!capturing.load(Ordering::SeqCst));
    assert!(stops.load(Ordering::SeqCst) >= 1);

    f.stop_scan();
    assert_eq!(f.state(), SessionState::Idle);
}

#[test]
fn test_superseded_ticket_is_refused() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(PendingScanner::default(), clock);

    let first = f.begin_scan();
    let second = f.begin_scan();

    let stale = f.deliver_payload(first, VALID_PAYLOAD);
    assert!(matches!(stale, Err(AppError::NoActiveScan)));
    assert_eq!(f.state(), SessionState::Scanning);

    let events = f.deliver_payload(second, VALID_PAYLOAD).expect("deliver");
    assert!(matches!(events[..], [SessionEvent::Success { .. }]));
}

#[test]
fn test_stop_scan_never_changes_attendance() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(PendingScanner::default(), clock);

    let ticket = f.begin_scan();
    f.stop_scan();

    assert_eq!(f.state(), SessionState::Idle);
    assert!(matches!(
        f.deliver_payload(ticket, VALID_PAYLOAD),
        Err(AppError::NoActiveScan)
    ));
    assert_eq!(f.stats().total_check_ins, 0);
}

#[test]
fn test_deliver_scanner_error() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(PendingScanner::default(), clock);

    let ticket = f.begin_scan();
    let events = f
        .deliver_scanner_error(ticket, "camera unplugged")
        .expect("deliver error");

    assert_eq!(
        events,
        vec![SessionEvent::ScannerError {
            reason: "camera unplugged".into()
        }]
    );
    assert_eq!(f.state(), SessionState::ScannerError);
}

#[test]
fn test_fifth_checkin_unlocks_reward_and_claim_persists() {
    let clock = FixedClock::new(at("2024-01-01 08:00"));
    let mut f = facade(PendingScanner::default(), clock.clone());

    for d in 1..=4 {
        clock.set(at(&format!("2024-01-{d:02} 08:00")));
        let events = f.check_in().expect("check-in");
        assert_eq!(events.len(), 1);
    }

    clock.set(at("2024-01-05 08:00"));
    let events = f.check_in().expect("fifth check-in");
    let unlocked = match &events[..] {
        [SessionEvent::Success { .. }, SessionEvent::RewardUnlocked { reward }] => reward.clone(),
        other => panic!("unexpected events: {other:?}"),
    };
    assert_eq!(unlocked.required_attendance, 5);

    let claimed = f.claim(&unlocked.id).expect("claim");
    assert!(claimed.claimed);

    let store = f.into_store();
    let persisted = store
        .catalog()
        .and_then(|c| c.iter().find(|r| r.id == unlocked.id))
        .expect("reward persisted");
    assert!(persisted.claimed);
}

#[test]
fn test_persistence_failure_surfaces_and_returns_to_idle() {
    let clock = FixedClock::new(at("2024-01-10 08:30"));
    let mut f = facade(PendingScanner::default(), clock);
    f.store_mut().fail_writes(true);

    let ticket = f.begin_scan();
    let res = f.deliver_payload(ticket, VALID_PAYLOAD);

    assert!(matches!(res, Err(AppError::Persistence(_))));
    assert_eq!(f.state(), SessionState::Idle);
    assert_eq!(f.stats().total_check_ins, 0);
    assert!(f.store().log().is_empty());
}
