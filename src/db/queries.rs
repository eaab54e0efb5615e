use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, AttendanceState, AttendanceStatus, Reward, RewardCategory};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_failure(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_column(idx: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_failure(idx, AppError::InvalidDate(raw.to_string())))
}

pub fn map_event_row(row: &Row) -> Result<AttendanceEvent> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = parse_date_column(1, &date_str)?;

    let time = NaiveTime::parse_from_str(&time_str, "%H:%M:%S")
        .map_err(|_| conversion_failure(2, AppError::InvalidTime(time_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_failure(4, AppError::Other(format!("Invalid status: {}", status_str)))
    })?;

    Ok(AttendanceEvent {
        id: row.get::<_, i64>("id")? as u64,
        date,
        time,
        location: row.get("location")?,
        status,
    })
}

/// Whole attendance log, oldest first.
pub fn load_events(conn: &Connection) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, time, location, status FROM attendance_log
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance_log (id, date, time, location, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ev.id as i64,
            ev.date_str(),
            ev.time_str(),
            ev.location,
            ev.status.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn load_state(conn: &Connection) -> AppResult<Option<AttendanceState>> {
    let row = conn
        .query_row(
            "SELECT last_check_in_date, streak, total_check_ins
             FROM attendance_state WHERE id = 1",
            [],
            |row| {
                let last: Option<String> = row.get(0)?;
                let last_check_in_date = match last {
                    Some(s) => Some(parse_date_column(0, &s)?),
                    None => None,
                };
                Ok(AttendanceState {
                    last_check_in_date,
                    streak: row.get(1)?,
                    total_check_ins: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(row)
}

pub fn upsert_state(conn: &Connection, state: &AttendanceState) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance_state (id, last_check_in_date, streak, total_check_ins)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             last_check_in_date = excluded.last_check_in_date,
             streak = excluded.streak,
             total_check_ins = excluded.total_check_ins",
        params![
            state
                .last_check_in_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            state.streak,
            state.total_check_ins,
        ],
    )?;
    Ok(())
}

fn map_reward_row(row: &Row) -> Result<Reward> {
    let category_str: String = row.get("category")?;
    let category = RewardCategory::from_db_str(&category_str).ok_or_else(|| {
        conversion_failure(
            6,
            AppError::Other(format!("Invalid reward category: {}", category_str)),
        )
    })?;

    Ok(Reward {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        required_attendance: row.get("required_attendance")?,
        points: row.get("points")?,
        category,
        claimed: row.get::<_, i32>("claimed")? == 1,
    })
}

/// Stored catalog in seed order, or `None` when it was never seeded.
pub fn load_catalog(conn: &Connection) -> AppResult<Option<Vec<Reward>>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, required_attendance, points, category, claimed
         FROM reward_catalog
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map([], map_reward_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    if out.is_empty() {
        Ok(None)
    } else {
        Ok(Some(out))
    }
}

/// Replace the stored catalog with `rewards`, keeping their order.
/// Callers wrap this in a transaction.
pub fn replace_catalog(conn: &Connection, rewards: &[Reward]) -> AppResult<()> {
    conn.execute("DELETE FROM reward_catalog", [])?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO reward_catalog
            (position, id, title, description, required_attendance, points, category, claimed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    for (pos, r) in rewards.iter().enumerate() {
        stmt.execute(params![
            pos as i64,
            r.id,
            r.title,
            r.description,
            r.required_attendance,
            r.points,
            r.category.to_db_str(),
            if r.claimed { 1 } else { 0 },
        ])?;
    }
    Ok(())
}
