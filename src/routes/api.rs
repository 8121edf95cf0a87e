// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ScreenEntry, User, MAX_WEEK_HOURS};
use crate::reporting::{
    self, current_streak, DateRange, Leaderboard, MetricsReport, Scope, UserTotal,
    DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT,
};
use crate::week;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/entries", post(submit_entry).get(list_entries))
        .route("/api/metrics/me", get(get_my_metrics))
        .route("/api/metrics/all", get(get_all_metrics))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── Period Parameters ───────────────────────────────────────

/// Query parameters shared by the metrics and leaderboard endpoints:
/// a scope tag plus the one reference parameter matching it.
#[derive(Deserialize)]
struct PeriodQuery {
    scope: String,
    #[serde(rename = "weekStart")]
    week_start: Option<String>,
    month: Option<String>,
    year: Option<String>,
}

impl PeriodQuery {
    /// Validate and resolve into a concrete range. All period errors
    /// surface before any database work starts.
    fn resolve(&self) -> Result<(Scope, DateRange)> {
        let scope = Scope::parse(&self.scope)?;
        let reference = match scope {
            Scope::Week => self.week_start.as_deref(),
            Scope::Month => self.month.as_deref(),
            Scope::Year => self.year.as_deref(),
        };
        let range = reporting::resolve_range(scope, reference)?;
        Ok((scope, range))
    }
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.db.get_user(&user.user_id).await?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("User {} not found", user.user_id))
    })?;

    Ok(Json(UserResponse {
        id: profile.user_id,
        name: profile.display_name,
    }))
}

// ─── Entry Submission ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitEntryRequest {
    /// Sunday of the reported week (YYYY-MM-DD)
    week_start: String,
    /// Reported screen time in hours, 0..=168
    total_hours: f64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitEntryResponse {
    pub success: bool,
    pub entry: ScreenEntry,
}

fn parse_week_start(raw: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        crate::error::AppError::BadRequest("Invalid weekStart: use YYYY-MM-DD".to_string())
    })?;

    if date.weekday() != Weekday::Sun {
        return Err(crate::error::AppError::BadRequest(
            "Week start must be a Sunday".to_string(),
        ));
    }

    Ok(date)
}

/// Submit (or replace) the caller's screen time for one week.
///
/// The week must be the current one or one of the two preceding it.
/// Also refreshes the caller's profile so the leaderboard has a
/// display name to show.
async fn submit_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SubmitEntryRequest>,
) -> Result<Json<SubmitEntryResponse>> {
    if !payload.total_hours.is_finite()
        || !(0.0..=MAX_WEEK_HOURS).contains(&payload.total_hours)
    {
        return Err(crate::error::AppError::BadRequest(
            "Invalid totalHours: must be between 0 and 168".to_string(),
        ));
    }

    let week_start = parse_week_start(&payload.week_start)?;

    let today = Utc::now().date_naive();
    if !week::in_submission_window(week_start, today) {
        return Err(crate::error::AppError::BadRequest(
            "Week must be within the current week or the two preceding weeks".to_string(),
        ));
    }

    let now = week::format_utc_rfc3339(Utc::now());

    // Refresh the profile; first submission creates it
    let profile = match state.db.get_user(&user.user_id).await? {
        Some(mut existing) => {
            existing.last_active = now.clone();
            if let Some(name) = &user.display_name {
                existing.display_name = name.clone();
            }
            existing
        }
        None => User {
            user_id: user.user_id.clone(),
            display_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| user.user_id.clone()),
            created_at: now.clone(),
            last_active: now.clone(),
        },
    };
    state.db.upsert_user(&profile).await?;

    let entry = ScreenEntry {
        user_id: user.user_id.clone(),
        week_start,
        total_hours: payload.total_hours,
        updated_at: now,
    };
    state.db.upsert_entry(&entry).await?;

    tracing::info!(
        user_id = %user.user_id,
        week_start = %week_start,
        total_hours = entry.total_hours,
        "Screen entry upserted"
    );

    Ok(Json(SubmitEntryResponse {
        success: true,
        entry,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntriesResponse {
    pub entries: Vec<ScreenEntry>,
}

/// List the caller's entries, most recent week first.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<EntriesResponse>> {
    let entries = state.db.entries_for_user(&user.user_id).await?;
    Ok(Json(EntriesResponse { entries }))
}

// ─── Metrics ─────────────────────────────────────────────────

/// Personal metrics over the requested period.
///
/// The streak is computed over the caller's full history, not the
/// requested range.
async fn get_my_metrics(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<MetricsReport>> {
    let (scope, range) = params.resolve()?;

    tracing::debug!(user_id = %user.user_id, scope = %scope, "Computing personal metrics");

    let entries = state
        .db
        .entries_for_user_in_range(&user.user_id, &range)
        .await?;
    let history = state.db.week_history(&user.user_id).await?;

    Ok(Json(reporting::personal_metrics(
        scope, range, &entries, &history,
    )))
}

/// Population metrics: the weekly series is averaged across everyone
/// who submitted for that week.
async fn get_all_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<MetricsReport>> {
    let (scope, range) = params.resolve()?;

    tracing::debug!(scope = %scope, "Computing population metrics");

    let entries = state.db.entries_in_range(&range).await?;

    Ok(Json(reporting::population_metrics(scope, range, &entries)))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    scope: String,
    #[serde(rename = "weekStart")]
    week_start: Option<String>,
    month: Option<String>,
    year: Option<String>,
    limit: Option<usize>,
}

/// Competition-ranked leaderboard, lowest hours first.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Leaderboard>> {
    let period = PeriodQuery {
        scope: params.scope,
        week_start: params.week_start,
        month: params.month,
        year: params.year,
    };
    let (scope, range) = period.resolve()?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);

    tracing::debug!(scope = %scope, limit, "Computing leaderboard");

    let entries = state.db.entries_in_range(&range).await?;

    // Function-local accumulator; no shared state across requests
    let mut hours_by_user: HashMap<String, f64> = HashMap::new();
    for entry in &entries {
        *hours_by_user.entry(entry.user_id.clone()).or_insert(0.0) += entry.total_hours;
    }

    let user_ids: Vec<String> = hours_by_user.keys().cloned().collect();
    let (profiles, histories) = tokio::try_join!(
        state.db.users_by_ids(&user_ids),
        state.db.week_histories(&user_ids)
    )?;

    let totals: Vec<UserTotal> = hours_by_user
        .into_iter()
        .map(|(user_id, total_hours)| {
            let display_name = profiles
                .get(&user_id)
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| user_id.clone());
            let streak = histories
                .get(&user_id)
                .and_then(|h| current_streak(h))
                .map(|s| s.weeks)
                .unwrap_or(0);
            UserTotal {
                user_id,
                display_name,
                total_hours,
                streak,
            }
        })
        .collect();

    Ok(Json(reporting::leaderboard(
        scope,
        range,
        totals,
        &user.user_id,
        limit,
    )))
}
