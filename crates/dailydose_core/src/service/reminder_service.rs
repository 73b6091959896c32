//! Reminder use-case service.
//!
//! # Responsibility
//! - Keep stored reminders and the platform scheduler in step.
//! - Compute the repeating water reminder plan.
//!
//! # Invariants
//! - Only active reminders due after `now` are handed to the scheduler.
//! - Scheduling mechanics (alarms, notification channels) stay behind
//!   `ReminderScheduler`.

use crate::model::reminder::Reminder;
use crate::model::validation::ValidationError;
use crate::repo::collection::RepoError;
use crate::repo::reminder_repo::ReminderRepository;
use crate::store::CollectionStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scheduler key used for the repeating water reminder.
pub const WATER_REMINDER_KEY: &str = "water_reminder";
pub const WATER_REMINDER_TITLE: &str = "💧 Time to Hydrate!";
pub const WATER_REMINDER_MESSAGE: &str = "Your body needs water. Take a refreshing break!";

/// One `(time, message)` hand-off to the platform scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    /// Stable key; scheduling the same key again replaces the earlier one.
    pub key: String,
    /// First trigger, epoch milliseconds.
    pub at_ms: i64,
    pub title: String,
    pub message: String,
    /// Repeat interval in milliseconds for repeating reminders.
    pub repeat_every_ms: Option<i64>,
}

/// Platform notification scheduler.
pub trait ReminderScheduler {
    fn schedule(&self, request: &ScheduleRequest) -> Result<(), String>;
    fn cancel(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug)]
pub enum ReminderServiceError {
    Repo(RepoError),
    Scheduler(String),
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Scheduler(message) => write!(f, "scheduler rejected request: {message}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Scheduler(_) => None,
        }
    }
}

impl From<RepoError> for ReminderServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for ReminderServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Repo(RepoError::Validation(value))
    }
}

pub type ReminderServiceResult<T> = Result<T, ReminderServiceError>;

pub struct ReminderService<'store, S: ReminderScheduler> {
    reminders: ReminderRepository<'store>,
    scheduler: S,
}

impl<'store, S: ReminderScheduler> ReminderService<'store, S> {
    pub fn new(store: &'store CollectionStore, scheduler: S) -> Self {
        Self {
            reminders: ReminderRepository::new(store),
            scheduler,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn reminders(&self) -> &ReminderRepository<'store> {
        &self.reminders
    }

    /// Stores a reminder and schedules it when it is active and upcoming.
    pub fn add_reminder(&self, reminder: &Reminder, now_ms: i64) -> ReminderServiceResult<()> {
        self.reminders.add(reminder)?;
        if reminder.is_active && reminder.reminder_time > now_ms {
            self.hand_off(&request_for(reminder))?;
        }
        Ok(())
    }

    /// Hands every upcoming reminder to the scheduler, soonest first.
    ///
    /// Returns how many were scheduled.
    pub fn schedule_upcoming(&self, now_ms: i64) -> ReminderServiceResult<usize> {
        let upcoming = self.reminders.upcoming(now_ms)?;
        for reminder in &upcoming {
            self.hand_off(&request_for(reminder))?;
        }
        info!(
            "event=reminder_schedule module=service status=ok scheduled={}",
            upcoming.len()
        );
        Ok(upcoming.len())
    }

    /// Flips `is_active` and schedules or cancels accordingly.
    ///
    /// # Errors
    /// - `Repo(NotFound)` when the reminder does not exist.
    pub fn toggle_active(&self, reminder_id: &str, now_ms: i64) -> ReminderServiceResult<bool> {
        if !self.reminders.toggle_active(reminder_id)? {
            return Err(RepoError::NotFound(reminder_id.to_string()).into());
        }
        let reminder = self
            .reminders
            .get(reminder_id)?
            .ok_or_else(|| RepoError::NotFound(reminder_id.to_string()))?;
        if reminder.is_active && reminder.reminder_time > now_ms {
            self.hand_off(&request_for(&reminder))?;
        } else {
            self.withdraw(reminder_id)?;
        }
        Ok(reminder.is_active)
    }

    /// Deletes a reminder and cancels its scheduled notification.
    pub fn delete_reminder(&self, reminder_id: &str) -> ReminderServiceResult<usize> {
        let removed = self.reminders.delete(reminder_id)?;
        if removed > 0 {
            self.withdraw(reminder_id)?;
        }
        Ok(removed)
    }

    /// Replaces the repeating water reminder.
    ///
    /// # Errors
    /// - `Validation` when `interval_minutes` is zero.
    pub fn schedule_water_reminder(
        &self,
        interval_minutes: u32,
        now_ms: i64,
    ) -> ReminderServiceResult<ScheduleRequest> {
        let request = water_reminder_plan(interval_minutes, now_ms)?;
        self.withdraw(WATER_REMINDER_KEY)?;
        self.hand_off(&request)?;
        Ok(request)
    }

    pub fn cancel_water_reminder(&self) -> ReminderServiceResult<()> {
        self.withdraw(WATER_REMINDER_KEY)
    }

    fn hand_off(&self, request: &ScheduleRequest) -> ReminderServiceResult<()> {
        self.scheduler.schedule(request).map_err(|err| {
            warn!(
                "event=reminder_schedule module=service status=error key={} error={}",
                request.key, err
            );
            ReminderServiceError::Scheduler(err)
        })
    }

    fn withdraw(&self, key: &str) -> ReminderServiceResult<()> {
        self.scheduler
            .cancel(key)
            .map_err(ReminderServiceError::Scheduler)
    }
}

/// Repeating plan: first trigger one interval after `now_ms`.
pub fn water_reminder_plan(
    interval_minutes: u32,
    now_ms: i64,
) -> Result<ScheduleRequest, ValidationError> {
    if interval_minutes == 0 {
        return Err(ValidationError::NonPositiveAmount("interval_minutes"));
    }
    let interval_ms = i64::from(interval_minutes) * 60 * 1000;
    Ok(ScheduleRequest {
        key: WATER_REMINDER_KEY.to_string(),
        at_ms: now_ms.saturating_add(interval_ms),
        title: WATER_REMINDER_TITLE.to_string(),
        message: WATER_REMINDER_MESSAGE.to_string(),
        repeat_every_ms: Some(interval_ms),
    })
}

fn request_for(reminder: &Reminder) -> ScheduleRequest {
    ScheduleRequest {
        key: reminder.id.clone(),
        at_ms: reminder.reminder_time,
        title: reminder.title.clone(),
        message: reminder.message.clone(),
        repeat_every_ms: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{water_reminder_plan, WATER_REMINDER_KEY};
    use crate::model::validation::ValidationError;

    #[test]
    fn water_plan_starts_one_interval_from_now() {
        let plan = water_reminder_plan(30, 1_000).unwrap();
        assert_eq!(plan.key, WATER_REMINDER_KEY);
        assert_eq!(plan.at_ms, 1_000 + 30 * 60 * 1000);
        assert_eq!(plan.repeat_every_ms, Some(30 * 60 * 1000));
    }

    #[test]
    fn water_plan_saturates_at_the_end_of_time() {
        let plan = water_reminder_plan(1, i64::MAX - 10).unwrap();
        assert_eq!(plan.at_ms, i64::MAX);
    }

    #[test]
    fn water_plan_rejects_zero_interval() {
        assert_eq!(
            water_reminder_plan(0, 0),
            Err(ValidationError::NonPositiveAmount("interval_minutes"))
        );
    }
}
