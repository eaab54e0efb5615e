pub mod attendance_event;
pub mod attendance_state;
pub mod attendance_status;
pub mod reward;
pub mod streak_policy;

pub use attendance_event::AttendanceEvent;
pub use attendance_state::{AttendanceState, AttendanceStats};
pub use attendance_status::AttendanceStatus;
pub use reward::{Reward, RewardAvailability, RewardCategory};
pub use streak_policy::StreakPolicy;
