//! Health goal collection.

use crate::model::goal::HealthGoal;
use crate::model::validation::ValidationError;
use crate::repo::collection::{CollectionRepository, Record, RepoResult};
use crate::store::Slot;

pub const HEALTH_GOALS_SLOT: Slot = Slot::new("health_data", "health_goals");

impl Record for HealthGoal {
    const SLOT: Slot = HEALTH_GOALS_SLOT;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        HealthGoal::validate(self)
    }
}

pub type GoalRepository<'store> = CollectionRepository<'store, HealthGoal>;

impl GoalRepository<'_> {
    pub fn active(&self) -> RepoResult<Vec<HealthGoal>> {
        self.find_by(|goal| goal.is_active)
    }

    /// Stores a new `current_value` as given (no clamping).
    ///
    /// Returns `false` when the goal does not exist.
    pub fn update_progress(&self, goal_id: &str, current_value: f64) -> RepoResult<bool> {
        self.modify(goal_id, |goal| goal.current_value = current_value)
    }

    pub fn set_active(&self, goal_id: &str, is_active: bool) -> RepoResult<bool> {
        self.modify(goal_id, |goal| goal.is_active = is_active)
    }
}
