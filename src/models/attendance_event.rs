use super::attendance_status::AttendanceStatus;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One successful check-in. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: u64,
    pub date: NaiveDate,          // ⇔ attendance_log.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,          // ⇔ attendance_log.time (TEXT "HH:MM:SS")
    pub location: String,         // ⇔ attendance_log.location
    pub status: AttendanceStatus, // ⇔ attendance_log.status ('present' | 'late')
}

impl AttendanceEvent {
    /// Build the event for a check-in recorded at local wall-clock time `at`.
    /// Sub-second precision is dropped so the event survives a storage round-trip.
    pub fn new(id: u64, at: NaiveDateTime, location: &str, late_hour: u32) -> Self {
        let time = at.time().with_nanosecond(0).unwrap_or_else(|| at.time());

        Self {
            id,
            date: at.date(),
            time,
            location: location.to_string(),
            status: AttendanceStatus::for_hour(at.hour(), late_hour),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
