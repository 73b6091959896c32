//! Local calendar arithmetic over epoch-millisecond timestamps.
//!
//! # Invariants
//! - Day windows are half-open: `[start of local day, start of next local day)`.
//! - Rolling windows are anchored to `now` and ignore day boundaries.
//! - All helpers take the reference time explicitly; only repository
//!   convenience methods read the system clock.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Half-open time window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms < self.end_ms
    }
}

/// The local calendar day containing `now`.
pub fn day_window<Tz: TimeZone>(now: &DateTime<Tz>) -> Window {
    date_window(&now.timezone(), now.date_naive())
}

/// The local calendar day `date` in time zone `tz`.
pub fn date_window<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Window {
    let next = date.succ_opt().unwrap_or(date);
    Window {
        start_ms: local_midnight_ms(tz, date),
        end_ms: local_midnight_ms(tz, next),
    }
}

/// Start of the rolling window covering the last `days` × 24h before `now`.
pub fn rolling_days_start<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> i64 {
    now.timestamp_millis() - days * MILLIS_PER_DAY
}

/// The last `days` local calendar dates ending with today, oldest first.
pub fn recent_dates<Tz: TimeZone>(now: &DateTime<Tz>, days: usize) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..days)
        .rev()
        .filter_map(|offset| {
            i64::try_from(offset)
                .ok()
                .and_then(|offset| today.checked_sub_signed(Duration::days(offset)))
        })
        .collect()
}

/// Local calendar date of an epoch-millisecond timestamp.
pub fn local_date<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(tz).date_naive())
}

fn local_midnight_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) => start.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        // Midnight skipped by a DST jump: the day starts at the first valid
        // local instant, which is at most a few hours later.
        LocalResult::None => first_valid_instant_ms(tz, midnight),
    }
}

fn first_valid_instant_ms<Tz: TimeZone>(tz: &Tz, from: NaiveDateTime) -> i64 {
    (1..=4 * 60)
        .map(|minutes| from + Duration::minutes(minutes))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map_or_else(
            || tz.from_utc_datetime(&from).timestamp_millis(),
            |start| start.timestamp_millis(),
        )
}
