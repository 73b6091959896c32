//! Water intake tracking on top of WATER health entries.
//!
//! # Invariants
//! - Daily totals use the local calendar day.
//! - `reset_day` removes only that day's WATER entries.

use crate::calendar::day_window;
use crate::model::health::{HealthEntry, HealthType};
use crate::model::validation::ValidationError;
use crate::repo::collection::RepoResult;
use crate::repo::health_repo::HealthRepository;
use crate::store::CollectionStore;
use chrono::{DateTime, TimeZone};
use log::info;

/// Daily hydration target expressed in glasses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrationGoal {
    pub glasses: u32,
    pub liters_per_glass: f64,
}

impl Default for HydrationGoal {
    fn default() -> Self {
        Self {
            glasses: 10,
            liters_per_glass: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrationProgress {
    pub total_liters: f64,
    /// Whole glasses drunk, capped at the goal.
    pub glasses: u32,
    pub goal_glasses: u32,
    /// `glasses / goal_glasses` as a percentage in `[0, 100]`.
    pub percent: f64,
}

impl HydrationProgress {
    pub fn goal_reached(&self) -> bool {
        self.glasses >= self.goal_glasses
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlassOutcome {
    Logged(HydrationProgress),
    /// Nothing was written; the day's goal was already met.
    GoalAlreadyReached(HydrationProgress),
}

pub struct HydrationService<'store> {
    entries: HealthRepository<'store>,
    goal: HydrationGoal,
}

impl<'store> HydrationService<'store> {
    pub fn new(store: &'store CollectionStore, goal: HydrationGoal) -> Self {
        Self {
            entries: HealthRepository::new(store),
            goal,
        }
    }

    pub fn goal(&self) -> HydrationGoal {
        self.goal
    }

    /// Records `liters` of water at `now`.
    ///
    /// # Errors
    /// - `Validation` when `liters` is not a positive finite number.
    pub fn log_water<Tz: TimeZone>(&self, liters: f64, now: &DateTime<Tz>) -> RepoResult<HealthEntry> {
        if !liters.is_finite() {
            return Err(ValidationError::NonFiniteValue("liters").into());
        }
        if liters <= 0.0 {
            return Err(ValidationError::NonPositiveAmount("liters").into());
        }
        let entry = HealthEntry::metric(HealthType::Water, liters, now.timestamp_millis());
        self.entries.add(&entry)?;
        Ok(entry)
    }

    /// Logs one glass unless the day's goal is already met.
    pub fn log_glass<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<GlassOutcome> {
        let before = self.daily_progress(now)?;
        if before.goal_reached() {
            return Ok(GlassOutcome::GoalAlreadyReached(before));
        }
        let entry = HealthEntry::metric(
            HealthType::Water,
            self.goal.liters_per_glass,
            now.timestamp_millis(),
        )
        .with_notes(format!(
            "Water intake - {}/{}",
            before.glasses + 1,
            self.goal.glasses
        ));
        self.entries.add(&entry)?;
        Ok(GlassOutcome::Logged(self.daily_progress(now)?))
    }

    /// Sum of WATER values in the local day containing `now`.
    pub fn total_on_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<f64> {
        let window = day_window(now);
        Ok(self
            .entries
            .all()?
            .iter()
            .filter(|entry| entry.kind == HealthType::Water && window.contains(entry.recorded_at))
            .map(|entry| entry.value)
            .sum())
    }

    pub fn daily_progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<HydrationProgress> {
        Ok(progress_for(self.total_on_day(now)?, self.goal))
    }

    /// Deletes the day's WATER entries, returning how many were removed.
    pub fn reset_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<usize> {
        let window = day_window(now);
        let removed = self.entries.retain(|entry| {
            !(entry.kind == HealthType::Water && window.contains(entry.recorded_at))
        })?;
        info!("event=hydration_reset module=service status=ok removed={removed}");
        Ok(removed)
    }
}

pub fn progress_for(total_liters: f64, goal: HydrationGoal) -> HydrationProgress {
    let glasses = if goal.liters_per_glass > 0.0 && total_liters > 0.0 {
        let whole = (total_liters / goal.liters_per_glass).floor();
        if whole >= f64::from(goal.glasses) {
            goal.glasses
        } else {
            whole as u32
        }
    } else {
        0
    };
    let percent = if goal.glasses == 0 {
        0.0
    } else {
        f64::from(glasses) / f64::from(goal.glasses) * 100.0
    };
    HydrationProgress {
        total_liters,
        glasses,
        goal_glasses: goal.glasses,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::{progress_for, HydrationGoal};

    #[test]
    fn progress_caps_at_goal() {
        let goal = HydrationGoal::default();
        let progress = progress_for(7.3, goal);
        assert_eq!(progress.glasses, 10);
        assert_eq!(progress.percent, 100.0);
        assert!(progress.goal_reached());
    }

    #[test]
    fn progress_counts_whole_glasses() {
        let progress = progress_for(1.25, HydrationGoal::default());
        assert_eq!(progress.glasses, 2);
        assert_eq!(progress.percent, 20.0);
        assert!(!progress.goal_reached());
    }

    #[test]
    fn zero_goal_never_divides() {
        let goal = HydrationGoal {
            glasses: 0,
            liters_per_glass: 0.0,
        };
        let progress = progress_for(3.0, goal);
        assert_eq!(progress.glasses, 0);
        assert_eq!(progress.percent, 0.0);
    }
}
