use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    /// `Late` iff the local hour is at or past `late_hour`.
    pub fn for_hour(hour: u32, late_hour: u32) -> Self {
        if hour >= late_hour {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }

    pub fn is_late(&self) -> bool {
        matches!(self, AttendanceStatus::Late)
    }
}
