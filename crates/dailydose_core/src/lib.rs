//! Core domain logic for DailyDose.
//!
//! Local-first personal health tracking: metric entries, goals, moods, todos,
//! reminders and habits persisted as JSON collections in SQLite, plus the
//! aggregations the dashboards render.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;
pub mod store;

pub use config::{open_store, BootstrapError, ConfigError, CoreConfig};
pub use logging::{
    default_log_level, init_logging, logging_status, parse_level, LogSettings, LoggingError,
};
pub use model::goal::HealthGoal;
pub use model::habit::{HabitCategory, HabitDetail, HabitEntry};
pub use model::health::{EntryDetail, HealthEntry, HealthType};
pub use model::mood::{MoodEntry, MoodType};
pub use model::reminder::Reminder;
pub use model::todo::{Priority, TodoItem};
pub use model::validation::{parse_metric_value, ValidationError};
pub use model::RecordId;
pub use repo::collection::{CollectionRepository, Record, RepoError, RepoResult};
pub use repo::goal_repo::GoalRepository;
pub use repo::health_repo::HealthRepository;
pub use repo::mood_repo::MoodRepository;
pub use repo::reminder_repo::ReminderRepository;
pub use repo::todo_repo::TodoRepository;
pub use service::habit_service::HabitService;
pub use service::hydration_service::{HydrationGoal, HydrationProgress, HydrationService};
pub use service::reminder_service::{ReminderScheduler, ReminderService, ScheduleRequest};
pub use stats::bmi::{bmi, bmi_category, bmi_from_entries, BmiCategory};
pub use store::{CollectionStore, CorruptPolicy, Slot, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
