// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly screen-time entry model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upper bound on reported hours: a week has 168 of them.
pub const MAX_WEEK_HOURS: f64 = 168.0;

/// Stored screen-time record in Firestore.
///
/// Identity is `(user_id, week_start)`; the document id encodes both,
/// so resubmitting a week overwrites the prior value instead of
/// creating a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScreenEntry {
    /// Owner (identity provider subject)
    pub user_id: String,
    /// Sunday that identifies the reported week
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub week_start: NaiveDate,
    /// Reported screen time for that week, 0..=168
    pub total_hours: f64,
    /// Last write timestamp (RFC3339)
    pub updated_at: String,
}

impl ScreenEntry {
    /// Firestore document id for this entry's identity pair.
    pub fn document_id(&self) -> String {
        entry_document_id(&self.user_id, self.week_start)
    }
}

/// Document id for a `(user, week)` pair.
pub fn entry_document_id(user_id: &str, week_start: NaiveDate) -> String {
    format!("{}_{}", user_id, week_start)
}
