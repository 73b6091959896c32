//! Series feeding the analytics charts.

use crate::calendar::{date_window, day_window, recent_dates, rolling_days_start, MILLIS_PER_DAY};
use crate::model::health::{HealthEntry, HealthType};
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// One weight measurement for the trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub recorded_at: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Headline numbers for the analytics screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrySummary {
    pub total: usize,
    /// Entries in the current local calendar day.
    pub today: usize,
    /// Entries in the rolling last 7 × 24h.
    pub this_week: usize,
    /// `total` divided by whole days since the first entry (at least 1).
    pub average_per_day: f64,
}

/// The last `limit` WEIGHT entries by `recorded_at`, oldest first.
pub fn weight_trend(entries: &[HealthEntry], limit: usize) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = entries
        .iter()
        .filter(|entry| entry.kind == HealthType::Weight)
        .map(|entry| TrendPoint {
            recorded_at: entry.recorded_at,
            value: entry.value,
        })
        .collect();
    points.sort_by_key(|point| point.recorded_at);
    let skip = points.len().saturating_sub(limit);
    points.split_off(skip)
}

/// Entry count per local calendar day for the last `days` days, oldest first.
pub fn daily_entry_counts<Tz: TimeZone>(
    entries: &[HealthEntry],
    now: &DateTime<Tz>,
    days: usize,
) -> Vec<DailyCount> {
    let tz = now.timezone();
    recent_dates(now, days)
        .into_iter()
        .map(|day| {
            let window = date_window(&tz, day);
            let count = entries
                .iter()
                .filter(|entry| window.contains(entry.recorded_at))
                .count();
            DailyCount { day, count }
        })
        .collect()
}

/// Count per metric type, largest first; ties follow `HealthType` order.
pub fn type_distribution(entries: &[HealthEntry]) -> Vec<(HealthType, usize)> {
    let mut counts: BTreeMap<HealthType, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.kind).or_insert(0) += 1;
    }
    let mut distribution: Vec<(HealthType, usize)> = counts.into_iter().collect();
    distribution.sort_by(|left, right| right.1.cmp(&left.1));
    distribution
}

pub fn entry_summary<Tz: TimeZone>(entries: &[HealthEntry], now: &DateTime<Tz>) -> EntrySummary {
    let today_window = day_window(now);
    let week_start = rolling_days_start(now, 7);
    let now_ms = now.timestamp_millis();

    let total = entries.len();
    let today = entries
        .iter()
        .filter(|entry| today_window.contains(entry.recorded_at))
        .count();
    let this_week = entries
        .iter()
        .filter(|entry| entry.recorded_at >= week_start)
        .count();

    let days_since_first = entries
        .iter()
        .map(|entry| entry.recorded_at)
        .min()
        .map_or(1, |first| (now_ms.saturating_sub(first) / MILLIS_PER_DAY).max(1));

    EntrySummary {
        total,
        today,
        this_week,
        average_per_day: total as f64 / days_since_first as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::{daily_entry_counts, entry_summary, type_distribution, weight_trend};
    use crate::calendar::MILLIS_PER_DAY;
    use crate::model::health::{HealthEntry, HealthType};
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn weight_trend_keeps_latest_points_in_order() {
        let entries: Vec<HealthEntry> = (0..10)
            .map(|index| HealthEntry::metric(HealthType::Weight, 80.0 - index as f64, 100 - index))
            .chain([HealthEntry::metric(HealthType::Steps, 5_000.0, 200)])
            .collect();

        let points = weight_trend(&entries, 7);
        assert_eq!(points.len(), 7);
        let timestamps: Vec<i64> = points.iter().map(|point| point.recorded_at).collect();
        assert_eq!(timestamps, vec![94, 95, 96, 97, 98, 99, 100]);
        assert_eq!(points[6].value, 80.0);

        assert_eq!(weight_trend(&entries, 50).len(), 10);
    }

    #[test]
    fn distribution_sorts_by_count() {
        let entries = vec![
            HealthEntry::metric(HealthType::Water, 0.25, 0),
            HealthEntry::metric(HealthType::Weight, 70.0, 0),
            HealthEntry::metric(HealthType::Water, 0.25, 0),
            HealthEntry::metric(HealthType::Steps, 10.0, 0),
        ];
        let distribution = type_distribution(&entries);
        assert_eq!(
            distribution,
            vec![
                (HealthType::Water, 2),
                (HealthType::Weight, 1),
                (HealthType::Steps, 1),
            ]
        );
    }

    #[test]
    fn daily_counts_and_summary_use_calendar_and_rolling_windows() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let now_ms = now.timestamp_millis();
        let entries = vec![
            HealthEntry::metric(HealthType::Water, 0.25, now_ms - 60_000),
            HealthEntry::metric(HealthType::Water, 0.25, now_ms - MILLIS_PER_DAY),
            HealthEntry::metric(HealthType::Weight, 70.0, now_ms - 9 * MILLIS_PER_DAY),
        ];

        let counts: Vec<usize> = daily_entry_counts(&entries, &now, 3)
            .iter()
            .map(|daily| daily.count)
            .collect();
        assert_eq!(counts, vec![0, 1, 1]);

        let summary = entry_summary(&entries, &now);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.today, 1);
        assert_eq!(summary.this_week, 2);
        assert!((summary.average_per_day - 3.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn summary_tolerates_extreme_timestamps() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        let entries = vec![
            HealthEntry::metric(HealthType::Steps, 1.0, i64::MIN),
            HealthEntry::metric(HealthType::Steps, 1.0, i64::MAX),
        ];
        let summary = entry_summary(&entries, &now);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.today, 0);
        assert!(summary.average_per_day > 0.0);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        let summary = entry_summary(&[], &now);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_per_day, 0.0);
    }
}
