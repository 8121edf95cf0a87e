// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly aggregation over screen-time entries.
//!
//! Two modes: a personal series (one point per submitted week) and a
//! population series (one point per week, averaged across submitters).
//! All wire values are rounded to 2 decimal places.

use crate::models::ScreenEntry;
use crate::reporting::types::{Aggregates, SeriesPoint};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Round to 2 decimal places for the wire.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Build the personal series and aggregates from one user's entries.
///
/// `entries` must already be ordered by `week_start` ascending (the
/// store adapter guarantees this). An empty slice yields an empty
/// series with zero aggregates.
pub fn personal(entries: &[ScreenEntry]) -> (Vec<SeriesPoint>, Aggregates) {
    let series: Vec<SeriesPoint> = entries
        .iter()
        .map(|e| SeriesPoint {
            date: e.week_start,
            total_hours: round2(e.total_hours),
        })
        .collect();

    let total: f64 = entries.iter().map(|e| e.total_hours).sum();
    let avg = if series.is_empty() {
        0.0
    } else {
        total / series.len() as f64
    };

    (
        series,
        Aggregates {
            total_hours: round2(total),
            avg_per_week: round2(avg),
        },
    )
}

/// Build the population series and aggregates from all users' entries.
///
/// Each series point is the mean of that week's submissions; weeks with
/// no submitters are never emitted. `totalHours` is the average total
/// per distinct user observed in the window, and `avgPerWeek` is the
/// mean of the per-week averages.
pub fn population(entries: &[ScreenEntry]) -> (Vec<SeriesPoint>, Aggregates) {
    // BTreeMap keeps the series ordered by week regardless of fetch order.
    let mut weeks: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    let mut users: HashSet<&str> = HashSet::new();
    let mut raw_total = 0.0;

    for entry in entries {
        let slot = weeks.entry(entry.week_start).or_insert((0.0, 0));
        slot.0 += entry.total_hours;
        slot.1 += 1;
        users.insert(entry.user_id.as_str());
        raw_total += entry.total_hours;
    }

    let series: Vec<SeriesPoint> = weeks
        .into_iter()
        .map(|(week, (sum, count))| SeriesPoint {
            date: week,
            total_hours: round2(sum / count as f64),
        })
        .collect();

    let avg_per_week = if series.is_empty() {
        0.0
    } else {
        series.iter().map(|p| p.total_hours).sum::<f64>() / series.len() as f64
    };

    (
        series,
        Aggregates {
            total_hours: round2(raw_total / users.len().max(1) as f64),
            avg_per_week: round2(avg_per_week),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user: &str, week: &str, hours: f64) -> ScreenEntry {
        ScreenEntry {
            user_id: user.to_string(),
            week_start: week.parse().unwrap(),
            total_hours: hours,
            updated_at: "2024-03-20T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_personal_sum_and_average() {
        let entries = vec![entry("u1", "2024-03-10", 10.0), entry("u1", "2024-03-17", 5.0)];

        let (series, aggregates) = personal(&entries);

        assert_eq!(series.len(), 2);
        assert_eq!(aggregates.total_hours, 15.0);
        assert_eq!(aggregates.avg_per_week, 7.5);
    }

    #[test]
    fn test_personal_rounds_to_two_decimals() {
        let entries = vec![
            entry("u1", "2024-03-10", 10.333),
            entry("u1", "2024-03-17", 10.333),
            entry("u1", "2024-03-24", 10.333),
        ];

        let (series, aggregates) = personal(&entries);

        assert_eq!(series[0].total_hours, 10.33);
        assert_eq!(aggregates.total_hours, 31.0);
        assert_eq!(aggregates.avg_per_week, 10.33);
    }

    #[test]
    fn test_personal_empty_is_zeroed_success() {
        let (series, aggregates) = personal(&[]);

        assert!(series.is_empty());
        assert_eq!(aggregates.total_hours, 0.0);
        assert_eq!(aggregates.avg_per_week, 0.0);
    }

    #[test]
    fn test_population_weekly_mean() {
        let entries = vec![
            entry("u1", "2024-03-10", 10.0),
            entry("u2", "2024-03-10", 20.0),
            entry("u1", "2024-03-17", 7.0),
        ];

        let (series, aggregates) = population(&entries);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-03-10".parse().unwrap());
        assert_eq!(series[0].total_hours, 15.0);
        assert_eq!(series[1].total_hours, 7.0);
        // 37 raw hours over 2 distinct users
        assert_eq!(aggregates.total_hours, 18.5);
        // mean of the per-week averages (15 and 7)
        assert_eq!(aggregates.avg_per_week, 11.0);
    }

    #[test]
    fn test_population_omits_empty_weeks() {
        // Only two of the five weeks in range have submissions; the
        // series must not contain zero-hour phantom points for the rest.
        let entries = vec![entry("u1", "2024-03-03", 4.0), entry("u2", "2024-03-31", 6.0)];

        let (series, _) = population(&entries);

        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|p| p.total_hours > 0.0));
    }

    #[test]
    fn test_population_series_sorted_regardless_of_input_order() {
        let entries = vec![
            entry("u1", "2024-03-17", 1.0),
            entry("u2", "2024-03-03", 2.0),
            entry("u3", "2024-03-10", 3.0),
        ];

        let (series, _) = population(&entries);

        let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, ["2024-03-03", "2024-03-10", "2024-03-17"]);
    }

    #[test]
    fn test_population_empty() {
        let (series, aggregates) = population(&[]);

        assert!(series.is_empty());
        assert_eq!(aggregates.total_hours, 0.0);
        assert_eq!(aggregates.avg_per_week, 0.0);
    }
}
