//! Reward Engine: the reward catalog, unlock detection and claim state.

use crate::errors::{AppError, AppResult, ClaimError};
use crate::models::{Reward, RewardCategory};
use crate::store::Store;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Catalog seeded on first run, in display order.
pub fn default_catalog() -> Vec<Reward> {
    vec![
        Reward::new(
            "1",
            "Free Protein Shake",
            "Get a complimentary protein shake from our juice bar",
            5,
            10,
            RewardCategory::Product,
        ),
        Reward::new(
            "2",
            "Free Personal Training Session",
            "One-on-one session with our certified trainers",
            10,
            50,
            RewardCategory::Service,
        ),
        Reward::new(
            "3",
            "ActiveCore Water Bottle",
            "Premium stainless steel water bottle",
            15,
            25,
            RewardCategory::Product,
        ),
        Reward::new(
            "4",
            "20% Off Supplements",
            "Discount on all supplement products",
            20,
            30,
            RewardCategory::Discount,
        ),
        Reward::new(
            "5",
            "Massage Therapy Session",
            "45-minute relaxation massage session",
            25,
            75,
            RewardCategory::Service,
        ),
        Reward::new(
            "6",
            "ActiveCore Gym Bag",
            "Premium branded gym bag with compartments",
            30,
            40,
            RewardCategory::Product,
        ),
    ]
}

/// Progress towards the next locked reward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardProgress {
    pub reward: Reward,
    pub current: u32,
    pub remaining: u32,
    pub percent: f64,
}

#[derive(Debug)]
pub struct RewardEngine {
    catalog: Vec<Reward>,
    // threshold → catalog indices, in catalog order
    by_threshold: HashMap<u32, Vec<usize>>,
    surfaced: HashSet<String>,
}

impl RewardEngine {
    /// Load the catalog from `store`, seeding the default one if the store
    /// has none yet.
    pub fn load<S: Store + ?Sized>(store: &mut S) -> AppResult<Self> {
        let catalog = match store.load_catalog()? {
            Some(catalog) => catalog,
            None => {
                let catalog = default_catalog();
                store
                    .save_catalog(&catalog)
                    .map_err(AppError::into_persistence)?;
                info!(rewards = catalog.len(), "reward catalog seeded");
                catalog
            }
        };

        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: Vec<Reward>) -> Self {
        let mut by_threshold: HashMap<u32, Vec<usize>> = HashMap::new();
        for (idx, reward) in catalog.iter().enumerate() {
            by_threshold
                .entry(reward.required_attendance)
                .or_default()
                .push(idx);
        }

        Self {
            catalog,
            by_threshold,
            surfaced: HashSet::new(),
        }
    }

    pub fn catalog(&self) -> &[Reward] {
        &self.catalog
    }

    pub fn get(&self, id: &str) -> Option<&Reward> {
        self.catalog.iter().find(|r| r.id == id)
    }

    /// Called once per successful check-in with the post-increment total.
    ///
    /// Returns the first (catalog order) unclaimed reward whose threshold is
    /// exactly `total_check_ins`. A reward is returned at most once per
    /// engine instance.
    ///
    /// At most one reward is returned per call. When several rewards share a
    /// threshold, the later ones are only surfaced by another call with the
    /// same total, which a normal check-in sequence never makes: they show up
    /// as available in `rewards` and can be claimed with `claim`, but never
    /// produce a `RewardUnlocked` event.
    pub fn on_attendance_increased(&mut self, total_check_ins: u32) -> Option<Reward> {
        let unlocked = self
            .by_threshold
            .get(&total_check_ins)?
            .iter()
            .map(|&idx| &self.catalog[idx])
            .find(|r| !r.claimed && !self.surfaced.contains(&r.id))?
            .clone();

        self.surfaced.insert(unlocked.id.clone());
        info!(id = %unlocked.id, title = %unlocked.title, "reward unlocked");
        Some(unlocked)
    }

    /// Mark reward `id` as claimed and persist the whole catalog.
    pub fn claim<S: Store + ?Sized>(
        &mut self,
        store: &mut S,
        id: &str,
        total_check_ins: u32,
    ) -> AppResult<Reward> {
        let idx = self
            .catalog
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ClaimError::NotFound(id.to_string()))?;

        let reward = &self.catalog[idx];
        if reward.claimed {
            return Err(ClaimError::AlreadyClaimed(id.to_string()).into());
        }
        if !reward.is_unlocked_at(total_check_ins) {
            return Err(ClaimError::NotEligible {
                id: id.to_string(),
                required: reward.required_attendance,
                total: total_check_ins,
            }
            .into());
        }

        let mut updated = self.catalog.clone();
        updated[idx].claimed = true;
        store
            .save_catalog(&updated)
            .map_err(AppError::into_persistence)?;
        self.catalog = updated;

        let claimed = self.catalog[idx].clone();
        debug!(id = %claimed.id, "reward claimed");

        if let Err(e) = store.record_audit("claim", &claimed.id, &claimed.title) {
            warn!(error = %e, "failed to write audit log");
        }

        Ok(claimed)
    }

    /// The unclaimed reward with the smallest threshold strictly above
    /// `total_check_ins`; first in catalog order on ties.
    pub fn next_locked_reward(&self, total_check_ins: u32) -> Option<&Reward> {
        self.catalog
            .iter()
            .filter(|r| !r.claimed && r.required_attendance > total_check_ins)
            .min_by_key(|r| r.required_attendance)
    }

    pub fn progress(&self, total_check_ins: u32) -> Option<RewardProgress> {
        let reward = self.next_locked_reward(total_check_ins)?;
        let percent = f64::from(total_check_ins) / f64::from(reward.required_attendance) * 100.0;

        Some(RewardProgress {
            reward: reward.clone(),
            current: total_check_ins,
            remaining: reward.required_attendance - total_check_ins,
            percent,
        })
    }

    pub fn claimed_count(&self) -> usize {
        self.catalog.iter().filter(|r| r.claimed).count()
    }
}
