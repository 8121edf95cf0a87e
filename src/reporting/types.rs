// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire-contract response types for metrics and leaderboard endpoints.
//!
//! Field names are camelCase on the wire; the frontend consumes these
//! shapes directly (exported via ts-rs when binding generation is on).

use crate::reporting::period::{DateRange, Scope};
use crate::reporting::streak::Streak;
use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One week's value in a metrics series.
///
/// In personal view this is the user's own submission; in the aggregate
/// view it is the mean across everyone who submitted for that week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub total_hours: f64,
}

/// Summary aggregates over a metrics series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub total_hours: f64,
    pub avg_per_week: f64,
}

/// Metrics response for both personal and population views.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub scope: Scope,
    pub range: DateRange,
    pub series: Vec<SeriesPoint>,
    pub aggregates: Aggregates,
    /// Absent when the user has no submissions at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
}

/// Public identity shown on the leaderboard.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
}

/// One ranked leaderboard entry.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user: PublicUser,
    pub total_hours: f64,
    pub top3: bool,
    /// Present only for streaks long enough to display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

/// The requesting user's own standing, surfaced even when their row
/// falls outside the truncated page.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RankSummary {
    pub rank: u32,
    pub total_hours: f64,
}

/// Leaderboard response.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub scope: Scope,
    pub range: DateRange,
    pub rows: Vec<LeaderboardRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_rank: Option<RankSummary>,
}
