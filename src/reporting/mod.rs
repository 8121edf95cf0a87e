// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Period aggregation and ranking engine.
//!
//! This module is the computational core of the app: it turns raw
//! weekly entries into metrics series, streaks, and the competition
//! leaderboard. Everything here is pure and synchronous — handlers
//! fetch fully-materialized collections first and then delegate.

pub mod aggregate;
pub mod period;
pub mod rank;
pub mod streak;
pub mod types;

pub use period::{resolve_range, DateRange, PeriodError, Scope};
pub use rank::UserTotal;
pub use streak::{current_streak, Streak};
pub use types::{
    Aggregates, Leaderboard, LeaderboardRow, MetricsReport, PublicUser, RankSummary, SeriesPoint,
};

use crate::models::ScreenEntry;
use chrono::NaiveDate;

/// Ranks at or below this value get the top-three badge.
pub const TOP_N: u32 = 3;

/// Streaks shorter than this are omitted from leaderboard rows; a
/// single submitted week doesn't read as a streak.
pub const MIN_DISPLAYED_STREAK: u32 = 2;

/// Leaderboard page size when the caller doesn't pass `limit`.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Server-side cap on the caller-supplied `limit`.
pub const MAX_LEADERBOARD_LIMIT: usize = 200;

/// Assemble the personal metrics response.
///
/// `entries` are the user's submissions inside `range`, ordered by week
/// ascending; `history` is the user's complete week-start history,
/// descending, for the streak (which ignores the range on purpose).
pub fn personal_metrics(
    scope: Scope,
    range: DateRange,
    entries: &[ScreenEntry],
    history: &[NaiveDate],
) -> MetricsReport {
    let (series, aggregates) = aggregate::personal(entries);

    MetricsReport {
        scope,
        range,
        series,
        aggregates,
        streak: current_streak(history),
    }
}

/// Assemble the population (all-users) metrics response. No streak in
/// this view.
pub fn population_metrics(scope: Scope, range: DateRange, entries: &[ScreenEntry]) -> MetricsReport {
    let (series, aggregates) = aggregate::population(entries);

    MetricsReport {
        scope,
        range,
        series,
        aggregates,
        streak: None,
    }
}

/// Assemble the leaderboard response.
///
/// Ranks are computed over the full population before truncating to
/// `limit`, and the requester's own standing is looked up in the full
/// ranked list so it survives truncation.
pub fn leaderboard(
    scope: Scope,
    range: DateRange,
    mut totals: Vec<UserTotal>,
    requester: &str,
    limit: usize,
) -> Leaderboard {
    for total in &mut totals {
        total.total_hours = aggregate::round2(total.total_hours);
    }

    let ranked = rank::rank(totals);

    let my_rank = ranked
        .iter()
        .find(|row| row.user.id == requester)
        .map(|row| RankSummary {
            rank: row.rank,
            total_hours: row.total_hours,
        });

    let mut rows = ranked;
    rows.truncate(limit);

    Leaderboard {
        scope,
        range,
        rows,
        my_rank,
    }
}
