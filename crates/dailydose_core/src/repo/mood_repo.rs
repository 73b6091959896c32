//! Mood entry collection and mood aggregates.

use crate::calendar::day_window;
use crate::model::mood::{MoodEntry, MoodType};
use crate::model::validation::ValidationError;
use crate::repo::collection::{CollectionRepository, Record, RepoResult};
use crate::stats::mood::{average_intensity, mood_counts, mood_trend, MoodTrendPoint};
use crate::store::Slot;
use chrono::{DateTime, Local, TimeZone};
use std::collections::BTreeMap;

pub const MOOD_ENTRIES_SLOT: Slot = Slot::new("mood_data", "mood_entries");
pub const DEFAULT_TREND_DAYS: usize = 7;

impl Record for MoodEntry {
    const SLOT: Slot = MOOD_ENTRIES_SLOT;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        MoodEntry::validate(self)
    }
}

pub type MoodRepository<'store> = CollectionRepository<'store, MoodEntry>;

impl MoodRepository<'_> {
    /// Entries recorded during the current local calendar day.
    pub fn today(&self) -> RepoResult<Vec<MoodEntry>> {
        Ok(moods_on_day(self.all()?, &Local::now()))
    }

    /// Entries with `start_ms <= recorded_at <= end_ms`.
    pub fn in_range(&self, start_ms: i64, end_ms: i64) -> RepoResult<Vec<MoodEntry>> {
        self.find_by(|entry| entry.recorded_at >= start_ms && entry.recorded_at <= end_ms)
    }

    pub fn statistics(&self) -> RepoResult<BTreeMap<MoodType, usize>> {
        Ok(mood_counts(&self.all()?))
    }

    pub fn average_intensity(&self) -> RepoResult<f64> {
        Ok(average_intensity(&self.all()?))
    }

    /// Daily mean intensity over the last `days` local days, oldest first.
    pub fn trend(&self, days: usize) -> RepoResult<Vec<MoodTrendPoint>> {
        Ok(mood_trend(&self.all()?, &Local::now(), days))
    }
}

pub fn moods_on_day<Tz: TimeZone>(entries: Vec<MoodEntry>, now: &DateTime<Tz>) -> Vec<MoodEntry> {
    let window = day_window(now);
    entries
        .into_iter()
        .filter(|entry| window.contains(entry.recorded_at))
        .collect()
}
