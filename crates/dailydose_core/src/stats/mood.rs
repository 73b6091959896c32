//! Mood statistics and daily intensity trend.

use crate::calendar::{date_window, recent_dates};
use crate::model::mood::{MoodEntry, MoodType};
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Mean intensity for one local calendar day (0.0 when no entries).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodTrendPoint {
    pub day: NaiveDate,
    pub average_intensity: f64,
}

/// Entry count per mood; moods without entries are absent.
pub fn mood_counts(entries: &[MoodEntry]) -> BTreeMap<MoodType, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of `intensity`, or 0.0 for no entries.
pub fn average_intensity(entries: &[MoodEntry]) -> f64 {
    mean_intensity(entries.iter())
}

/// One point per local calendar day for the last `days` days, oldest first.
pub fn mood_trend<Tz: TimeZone>(
    entries: &[MoodEntry],
    now: &DateTime<Tz>,
    days: usize,
) -> Vec<MoodTrendPoint> {
    let tz = now.timezone();
    recent_dates(now, days)
        .into_iter()
        .map(|day| {
            let window = date_window(&tz, day);
            let average_intensity = mean_intensity(
                entries
                    .iter()
                    .filter(|entry| window.contains(entry.recorded_at)),
            );
            MoodTrendPoint {
                day,
                average_intensity,
            }
        })
        .collect()
}

fn mean_intensity<'a>(entries: impl Iterator<Item = &'a MoodEntry>) -> f64 {
    let (sum, count) = entries.fold((0_u64, 0_u64), |(sum, count), entry| {
        (sum + u64::from(entry.intensity), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
