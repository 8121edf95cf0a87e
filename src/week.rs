// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for the Sunday-start week convention and timestamps.

use chrono::{DateTime, Datelike, Days, NaiveDate, SecondsFormat, Utc};

/// How many weeks back (inclusive of the current one) a submission may
/// target: the current week and the two preceding weeks.
pub const SUBMISSION_WINDOW_WEEKS: u64 = 3;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Snap a date to the Sunday that starts its week.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    // num_days_from_sunday is at most 6, well inside NaiveDate's range
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Whether a week start is inside the submission window relative to
/// `today`: the current week's Sunday or one of the two before it.
pub fn in_submission_window(week_start: NaiveDate, today: NaiveDate) -> bool {
    let current = week_start_of(today);
    let Some(earliest) = current.checked_sub_days(Days::new(7 * (SUBMISSION_WINDOW_WEEKS - 1)))
    else {
        return false;
    };
    week_start >= earliest && week_start <= current
}
