// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-week streak detection.
//!
//! Streaks are always computed over the user's complete submission
//! history, never bounded by the requested reporting period — a streak
//! can span prior months or years.

use chrono::{Days, NaiveDate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An unbroken run of weekly submissions ending at the most recent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub weeks: u32,
    /// Week start of the oldest entry still inside the run.
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub current_start: NaiveDate,
}

/// Find the current streak in a full history of week-start dates,
/// sorted descending (most recent first).
///
/// Returns `None` for an empty history; a user with any submission has
/// a streak of at least 1. The run continues only while each older
/// entry is exactly 7 days before the one after it.
pub fn current_streak(history: &[NaiveDate]) -> Option<Streak> {
    let (&latest, rest) = history.split_first()?;

    let mut weeks = 1;
    let mut current_start = latest;

    for &older in rest {
        if current_start.checked_sub_days(Days::new(7)) == Some(older) {
            weeks += 1;
            current_start = older;
        } else {
            break;
        }
    }

    Some(Streak {
        weeks,
        current_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(strs: &[&str]) -> Vec<NaiveDate> {
        strs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_gap_breaks_run() {
        let history = dates(&["2024-03-17", "2024-03-10", "2024-03-03", "2024-02-18"]);

        let streak = current_streak(&history).unwrap();

        assert_eq!(streak.weeks, 3);
        assert_eq!(streak.current_start, "2024-03-03".parse().unwrap());
    }

    #[test]
    fn test_single_entry_is_one_week_streak() {
        let streak = current_streak(&dates(&["2024-03-17"])).unwrap();

        assert_eq!(streak.weeks, 1);
        assert_eq!(streak.current_start, "2024-03-17".parse().unwrap());
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(current_streak(&[]), None);
    }

    #[test]
    fn test_unbroken_history() {
        let history = dates(&["2024-03-24", "2024-03-17", "2024-03-10"]);

        let streak = current_streak(&history).unwrap();

        assert_eq!(streak.weeks, 3);
        assert_eq!(streak.current_start, "2024-03-10".parse().unwrap());
    }

    #[test]
    fn test_immediate_gap_stops_at_latest() {
        // Most recent entry is isolated; older consecutive entries
        // don't count toward the current streak.
        let history = dates(&["2024-03-24", "2024-03-03", "2024-02-25"]);

        let streak = current_streak(&history).unwrap();

        assert_eq!(streak.weeks, 1);
        assert_eq!(streak.current_start, "2024-03-24".parse().unwrap());
    }

    #[test]
    fn test_run_across_year_boundary() {
        let history = dates(&["2024-01-07", "2023-12-31", "2023-12-24"]);

        let streak = current_streak(&history).unwrap();

        assert_eq!(streak.weeks, 3);
        assert_eq!(streak.current_start, "2023-12-24".parse().unwrap());
    }
}
