//! Health goals.

use crate::model::health::HealthType;
use crate::model::validation::{require_finite, require_id, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

/// Default goal span when no end date is given.
pub const DEFAULT_GOAL_SPAN_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Target for one metric over a date range.
///
/// `current_value` is stored as given; only `progress_percent` clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthGoal {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: HealthType,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    /// Epoch milliseconds.
    pub start_date: i64,
    /// Epoch milliseconds.
    pub end_date: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl HealthGoal {
    /// Creates an active goal spanning `DEFAULT_GOAL_SPAN_MS` from `start_date`.
    pub fn new(kind: HealthType, target_value: f64, start_date: i64) -> Self {
        Self {
            id: new_record_id(),
            kind,
            target_value,
            current_value: 0.0,
            start_date,
            end_date: start_date.saturating_add(DEFAULT_GOAL_SPAN_MS),
            is_active: true,
        }
    }

    /// Progress toward the target as a percentage in `[0, 100]`.
    ///
    /// Returns 0 for a non-positive target.
    pub fn progress_percent(&self) -> f64 {
        if self.target_value <= 0.0 {
            return 0.0;
        }
        (self.current_value / self.target_value * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_achieved(&self) -> bool {
        self.target_value > 0.0 && self.current_value >= self.target_value
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        require_finite("target_value", self.target_value)?;
        require_finite("current_value", self.current_value)?;
        if self.target_value <= 0.0 {
            return Err(ValidationError::NonPositiveTarget(self.target_value));
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HealthGoal, DEFAULT_GOAL_SPAN_MS};
    use crate::model::health::HealthType;
    use crate::model::validation::ValidationError;

    #[test]
    fn new_goal_spans_thirty_days() {
        let goal = HealthGoal::new(HealthType::Steps, 10_000.0, 1_000);
        assert_eq!(goal.end_date - goal.start_date, DEFAULT_GOAL_SPAN_MS);
        assert!(goal.is_active);
        assert_eq!(goal.current_value, 0.0);
    }

    #[test]
    fn new_goal_near_the_end_of_time_saturates() {
        let goal = HealthGoal::new(HealthType::Steps, 10_000.0, i64::MAX - 1);
        assert_eq!(goal.end_date, i64::MAX);
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn progress_is_clamped_but_value_is_not() {
        let mut goal = HealthGoal::new(HealthType::Water, 2.0, 0);
        goal.current_value = 5.0;
        assert_eq!(goal.progress_percent(), 100.0);
        assert_eq!(goal.current_value, 5.0);

        goal.current_value = -1.0;
        assert_eq!(goal.progress_percent(), 0.0);

        goal.current_value = 0.5;
        assert_eq!(goal.progress_percent(), 25.0);
    }

    #[test]
    fn validate_rejects_bad_targets_and_ranges() {
        let mut goal = HealthGoal::new(HealthType::Weight, 0.0, 0);
        assert!(matches!(
            goal.validate(),
            Err(ValidationError::NonPositiveTarget(_))
        ));

        goal.target_value = 65.0;
        goal.end_date = -1;
        assert!(matches!(
            goal.validate(),
            Err(ValidationError::InvalidDateRange { .. })
        ));

        goal.end_date = 10;
        goal.current_value = f64::INFINITY;
        assert!(matches!(
            goal.validate(),
            Err(ValidationError::NonFiniteValue("current_value"))
        ));
    }
}
