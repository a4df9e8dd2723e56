//! Zero-filled daily series over a trailing window.
//!
//! The density guarantee matters: the forecaster differences the series, so
//! a missing day would silently change the model's meaning. Every series
//! produced here has exactly `window_days + 1` entries, one per calendar
//! day, with explicit zeros.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::icu::icu_count_at;
use super::join::JoinedRow;
use crate::models::Encounter;

/// One day of a daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// The calendar days of the trailing window, oldest first:
/// `as_of - window_days ..= as_of`.
fn window_dates(as_of: DateTime<Utc>, window_days: i64) -> Vec<NaiveDate> {
    let end = as_of.date_naive();
    (0..=window_days)
        .map(|offset| end - Duration::days(window_days - offset))
        .collect()
}

/// Encounters bucketed by admission (start) date, zero-filled over the
/// window.
pub fn daily_admissions(
    encounters: &[&Encounter],
    as_of: DateTime<Utc>,
    window_days: i64,
) -> Vec<DailyCount> {
    let mut by_date: HashMap<NaiveDate, u64> = HashMap::new();
    for encounter in encounters {
        *by_date.entry(encounter.start.date_naive()).or_insert(0) += 1;
    }

    window_dates(as_of, window_days)
        .into_iter()
        .map(|date| DailyCount {
            date,
            count: by_date.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// ICU occupancy per day: `|ICUSet(d)|` evaluated at the end of each window
/// day, so same-day admissions count toward their admission day.
pub fn daily_icu_occupancy(
    rows: &[JoinedRow<'_>],
    severe_codes: &HashSet<&str>,
    as_of: DateTime<Utc>,
    window_days: i64,
) -> Vec<DailyCount> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    window_dates(as_of, window_days)
        .into_iter()
        .map(|date| DailyCount {
            date,
            count: icu_count_at(rows, severe_codes, date.and_time(end_of_day).and_utc()) as u64,
        })
        .collect()
}
