//! Habit use-case service.
//!
//! # Responsibility
//! - Log, edit and delete habit completions stored as health entries.
//! - Upgrade legacy `"HABIT: "` notes into structured habit details.
//!
//! # Invariants
//! - New completions are written with `EntryDetail::HabitCompletion`.
//! - Edits keep the entry id and timestamp, replacing only habit fields.

use crate::model::habit::{HabitDetail, HabitEntry};
use crate::model::health::{EntryDetail, HealthEntry, HealthType};
use crate::model::now_millis;
use crate::repo::collection::{RepoError, RepoResult};
use crate::repo::health_repo::{entries_on_day, HealthRepository};
use crate::store::CollectionStore;
use chrono::{DateTime, TimeZone};
use log::info;

/// Habit facade over the health entry collection.
pub struct HabitService<'store> {
    entries: HealthRepository<'store>,
}

impl<'store> HabitService<'store> {
    pub fn new(store: &'store CollectionStore) -> Self {
        Self {
            entries: HealthRepository::new(store),
        }
    }

    /// Records a completed habit now.
    ///
    /// # Errors
    /// - `Validation` when `title` is blank.
    pub fn log_habit(
        &self,
        title: &str,
        description: &str,
        category: &str,
    ) -> RepoResult<HabitEntry> {
        let mut habit = HabitEntry::new(title.trim(), now_millis());
        habit.description = description.trim().to_string();
        habit.category = category.trim().to_string();
        self.log(&habit)?;
        Ok(habit)
    }

    /// Persists a caller-built habit.
    pub fn log(&self, habit: &HabitEntry) -> RepoResult<()> {
        habit.validate()?;
        self.entries.add(&habit.to_health_entry())?;
        info!(
            "event=habit_log module=service status=ok habit_id={}",
            habit.id
        );
        Ok(())
    }

    /// Replaces title, description and category of an existing habit.
    ///
    /// Legacy entries are upgraded to the structured form on edit. Returns
    /// `false` when no habit entry has this id.
    pub fn edit_habit(
        &self,
        habit_id: &str,
        title: &str,
        description: &str,
        category: &str,
    ) -> RepoResult<bool> {
        let detail = HabitDetail::new(title.trim(), description.trim(), category.trim());
        detail.validate()?;

        match self.entries.get(habit_id)? {
            Some(entry) if entry.is_habit() => {}
            _ => return Ok(false),
        }

        self.entries.modify(habit_id, |entry| {
            if matches!(entry.detail, EntryDetail::Metric) {
                entry.notes.clear();
            }
            entry.kind = HealthType::Habit;
            entry.unit = HealthType::Habit.default_unit().to_string();
            entry.detail = EntryDetail::HabitCompletion(detail);
        })
    }

    /// Deletes a habit entry; plain metrics with this id are left alone.
    ///
    /// # Errors
    /// - `NotFound` when no habit entry has this id.
    pub fn delete_habit(&self, habit_id: &str) -> RepoResult<()> {
        let removed = self
            .entries
            .retain(|entry| !(entry.id == habit_id && entry.is_habit()))?;
        if removed == 0 {
            return Err(RepoError::NotFound(habit_id.to_string()));
        }
        Ok(())
    }

    pub fn habits(&self) -> RepoResult<Vec<HabitEntry>> {
        Ok(to_habits(&self.entries.habits()?))
    }

    /// Habits completed during the local calendar day containing `now`.
    pub fn habits_on_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> RepoResult<Vec<HabitEntry>> {
        Ok(to_habits(&entries_on_day(self.entries.habits()?, now)))
    }

    /// Removes every habit completion, keeping plain metrics.
    pub fn clear_habit_history(&self) -> RepoResult<usize> {
        let removed = self.entries.retain(|entry| !entry.is_habit())?;
        info!("event=habit_clear module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Rewrites legacy notes-encoded habits into structured entries.
    ///
    /// Returns the number of entries upgraded.
    pub fn migrate_legacy_habits(&self) -> RepoResult<usize> {
        let upgraded = self.entries.rewrite(upgrade_legacy_habit)?;
        info!("event=habit_migrate module=service status=ok upgraded={upgraded}");
        Ok(upgraded)
    }
}

fn to_habits(entries: &[HealthEntry]) -> Vec<HabitEntry> {
    entries
        .iter()
        .filter_map(HabitEntry::from_health_entry)
        .collect()
}

fn upgrade_legacy_habit(entry: &mut HealthEntry) -> bool {
    if !matches!(entry.detail, EntryDetail::Metric) {
        return false;
    }
    let Some(detail) = entry.habit_detail() else {
        return false;
    };
    // Legacy titles were never validated; keep them readable rather than
    // failing the whole migration.
    let detail = if detail.title.trim().is_empty() {
        HabitDetail::new("Habit", detail.description, detail.category)
    } else {
        detail
    };
    entry.kind = HealthType::Habit;
    entry.unit = HealthType::Habit.default_unit().to_string();
    entry.notes.clear();
    entry.detail = EntryDetail::HabitCompletion(detail);
    true
}
