//! Schema migrations. Every step is idempotent and recorded in `log`
//! as `migration_applied`, so re-running the engine is a no-op.

use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::info;

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_attendance_log",
        message: "Created attendance_log table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance_log (
            id          INTEGER PRIMARY KEY,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            location    TEXT NOT NULL DEFAULT '',
            status      TEXT NOT NULL CHECK(status IN ('present','late')),
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_attendance_state",
        message: "Created attendance_state table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance_state (
            id                  INTEGER PRIMARY KEY CHECK(id = 1),
            last_check_in_date  TEXT,
            streak              INTEGER NOT NULL DEFAULT 0,
            total_check_ins     INTEGER NOT NULL DEFAULT 0
        );
        "#,
    },
    Migration {
        version: "20250301_0003_create_reward_catalog",
        message: "Created reward_catalog table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS reward_catalog (
            position             INTEGER PRIMARY KEY,
            id                   TEXT NOT NULL UNIQUE,
            title                TEXT NOT NULL,
            description          TEXT NOT NULL DEFAULT '',
            required_attendance  INTEGER NOT NULL,
            points               INTEGER NOT NULL DEFAULT 0,
            category             TEXT NOT NULL CHECK(category IN ('product','service','discount')),
            claimed              INTEGER NOT NULL DEFAULT 0
        );
        "#,
    },
    Migration {
        version: "20250412_0004_unique_attendance_date",
        message: "Added unique index on attendance_log(date)",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_log_date ON attendance_log(date);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
/// Returns how many were applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![chrono::Local::now().to_rfc3339(), m.version, m.message],
        )?;
        tx.commit()?;

        info!(version = m.version, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
