/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::{AttendanceStatus, RewardAvailability};

pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Late => YELLOW,
    }
}

pub fn color_for_availability(availability: RewardAvailability) -> &'static str {
    match availability {
        RewardAvailability::Locked => GREY,
        RewardAvailability::Available => GREEN,
        RewardAvailability::Claimed => CYAN,
    }
}
