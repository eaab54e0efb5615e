use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Product,
    Service,
    Discount,
}

impl RewardCategory {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RewardCategory::Product => "product",
            RewardCategory::Service => "service",
            RewardCategory::Discount => "discount",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "product" => Some(RewardCategory::Product),
            "service" => Some(RewardCategory::Service),
            "discount" => Some(RewardCategory::Discount),
            _ => None,
        }
    }
}

/// Where a reward stands relative to the current attendance total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardAvailability {
    Locked,
    Available,
    Claimed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_attendance: u32,
    pub points: u32,
    pub category: RewardCategory,
    pub claimed: bool,
}

impl Reward {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        required_attendance: u32,
        points: u32,
        category: RewardCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            required_attendance,
            points,
            category,
            claimed: false,
        }
    }

    pub fn is_unlocked_at(&self, total_check_ins: u32) -> bool {
        total_check_ins >= self.required_attendance
    }

    pub fn availability(&self, total_check_ins: u32) -> RewardAvailability {
        if self.claimed {
            RewardAvailability::Claimed
        } else if self.is_unlocked_at(total_check_ins) {
            RewardAvailability::Available
        } else {
            RewardAvailability::Locked
        }
    }
}
