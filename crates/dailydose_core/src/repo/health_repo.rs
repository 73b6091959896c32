//! Health entry collection and its time-window filters.
//!
//! # Invariants
//! - "Today" is the local calendar day, half-open at local midnight.
//! - "Weekly" is a rolling `now - 7 × 24h` window, not calendar-aligned, so
//!   it is a superset of today's in-window entries rather than disjoint.

use crate::calendar::{day_window, rolling_days_start};
use crate::model::health::{HealthEntry, HealthType};
use crate::model::validation::ValidationError;
use crate::repo::collection::{CollectionRepository, Record, RepoResult};
use crate::store::Slot;
use chrono::{DateTime, Local, TimeZone};

pub const HEALTH_ENTRIES_SLOT: Slot = Slot::new("health_data", "health_entries");
pub const WEEKLY_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_RECENT_LIMIT: usize = 10;

impl Record for HealthEntry {
    const SLOT: Slot = HEALTH_ENTRIES_SLOT;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        HealthEntry::validate(self)
    }
}

pub type HealthRepository<'store> = CollectionRepository<'store, HealthEntry>;

impl HealthRepository<'_> {
    pub fn by_type(&self, kind: HealthType) -> RepoResult<Vec<HealthEntry>> {
        self.find_by(|entry| entry.kind == kind)
    }

    /// Entries recorded during the current local calendar day.
    pub fn today(&self) -> RepoResult<Vec<HealthEntry>> {
        Ok(entries_on_day(self.all()?, &Local::now()))
    }

    /// Entries recorded within the last 7 × 24h.
    pub fn weekly(&self) -> RepoResult<Vec<HealthEntry>> {
        Ok(entries_in_rolling_week(self.all()?, &Local::now()))
    }

    /// Newest `limit` entries, most recent first.
    pub fn recent(&self, limit: usize) -> RepoResult<Vec<HealthEntry>> {
        Ok(most_recent(self.all()?, limit))
    }

    /// Habit completions, structured or legacy-encoded.
    pub fn habits(&self) -> RepoResult<Vec<HealthEntry>> {
        self.find_by(HealthEntry::is_habit)
    }

    /// Everything that is not a habit completion.
    pub fn metrics(&self) -> RepoResult<Vec<HealthEntry>> {
        self.find_by(|entry| !entry.is_habit())
    }
}

pub fn entries_on_day<Tz: TimeZone>(
    entries: Vec<HealthEntry>,
    now: &DateTime<Tz>,
) -> Vec<HealthEntry> {
    let window = day_window(now);
    entries
        .into_iter()
        .filter(|entry| window.contains(entry.recorded_at))
        .collect()
}

pub fn entries_in_rolling_week<Tz: TimeZone>(
    entries: Vec<HealthEntry>,
    now: &DateTime<Tz>,
) -> Vec<HealthEntry> {
    let since = rolling_days_start(now, WEEKLY_WINDOW_DAYS);
    entries
        .into_iter()
        .filter(|entry| entry.recorded_at >= since)
        .collect()
}

/// Sorts by `recorded_at` descending (stable) and keeps the first `limit`.
pub fn most_recent(mut entries: Vec<HealthEntry>, limit: usize) -> Vec<HealthEntry> {
    entries.sort_by(|left, right| right.recorded_at.cmp(&left.recorded_at));
    entries.truncate(limit);
    entries
}
