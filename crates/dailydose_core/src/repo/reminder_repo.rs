//! Reminder collection.

use crate::model::reminder::Reminder;
use crate::model::validation::ValidationError;
use crate::repo::collection::{CollectionRepository, Record, RepoResult};
use crate::store::Slot;

pub const REMINDERS_SLOT: Slot = Slot::new("reminder_data", "reminders");

impl Record for Reminder {
    const SLOT: Slot = REMINDERS_SLOT;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Reminder::validate(self)
    }
}

pub type ReminderRepository<'store> = CollectionRepository<'store, Reminder>;

impl ReminderRepository<'_> {
    pub fn active(&self) -> RepoResult<Vec<Reminder>> {
        self.find_by(|reminder| reminder.is_active)
    }

    /// Active reminders due strictly after `now_ms`, soonest first.
    pub fn upcoming(&self, now_ms: i64) -> RepoResult<Vec<Reminder>> {
        Ok(upcoming_reminders(self.all()?, now_ms))
    }

    /// Flips `is_active`. Returns `false` when the reminder does not exist.
    pub fn toggle_active(&self, reminder_id: &str) -> RepoResult<bool> {
        self.modify(reminder_id, |reminder| reminder.is_active = !reminder.is_active)
    }
}

pub fn upcoming_reminders(reminders: Vec<Reminder>, now_ms: i64) -> Vec<Reminder> {
    let mut upcoming: Vec<Reminder> = reminders
        .into_iter()
        .filter(|reminder| reminder.is_active && reminder.reminder_time > now_ms)
        .collect();
    upcoming.sort_by_key(|reminder| reminder.reminder_time);
    upcoming
}
