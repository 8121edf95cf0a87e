// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (display profiles)
//! - Screen entries (weekly submissions, upsert by identity pair)
//! - Reporting reads (range scans, full histories)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ScreenEntry, User};
use crate::reporting::DateRange;
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use std::collections::HashMap;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by provider subject.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch profiles for a set of users, keyed by user id.
    ///
    /// Missing profiles are simply absent from the map; callers decide
    /// on a display fallback.
    pub async fn users_by_ids(&self, user_ids: &[String]) -> Result<HashMap<String, User>, AppError> {
        let users = stream::iter(user_ids.to_vec())
            .map(|user_id| async move { self.get_user(&user_id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<User>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<User>>, AppError>>()?;

        Ok(users
            .into_iter()
            .flatten()
            .map(|u| (u.user_id.clone(), u))
            .collect())
    }

    // ─── Entry Operations ────────────────────────────────────────

    /// Create or replace a weekly entry.
    ///
    /// The document id is the `(user, week)` identity pair, so writing
    /// the same week twice replaces the prior value.
    pub async fn upsert_entry(&self, entry: &ScreenEntry) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ENTRIES)
            .document_id(entry.document_id())
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get one user's entries inside a date range, oldest week first.
    pub async fn entries_for_user_in_range(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> Result<Vec<ScreenEntry>, AppError> {
        let user_id = user_id.to_string();
        let (start, end) = (range.start.to_string(), range.end.to_string());

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("week_start").greater_than_or_equal(start.clone()),
                    q.field("week_start").less_than_or_equal(end.clone()),
                ])
            })
            .order_by([("week_start", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every user's entries inside a date range.
    ///
    /// No ordering contract; the aggregator groups by week itself.
    pub async fn entries_in_range(&self, range: &DateRange) -> Result<Vec<ScreenEntry>, AppError> {
        let (start, end) = (range.start.to_string(), range.end.to_string());

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .filter(move |q| {
                q.for_all([
                    q.field("week_start").greater_than_or_equal(start.clone()),
                    q.field("week_start").less_than_or_equal(end.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's complete week-start history, most recent first.
    ///
    /// Unbounded by any range: streaks span reporting periods.
    pub async fn week_history(&self, user_id: &str) -> Result<Vec<NaiveDate>, AppError> {
        let user_id = user_id.to_string();

        let entries: Vec<ScreenEntry> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([(
                "week_start",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(entries.into_iter().map(|e| e.week_start).collect())
    }

    /// Get complete week-start histories for a set of users.
    ///
    /// Uses concurrent reads with a limit to avoid overloading Firestore.
    pub async fn week_histories(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, Vec<NaiveDate>>, AppError> {
        stream::iter(user_ids.to_vec())
            .map(|user_id| async move {
                let history = self.week_history(&user_id).await?;
                Ok::<_, AppError>((user_id, history))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(String, Vec<NaiveDate>), AppError>>>()
            .await
            .into_iter()
            .collect()
    }

    /// Get all of a user's entries, most recent week first.
    pub async fn entries_for_user(&self, user_id: &str) -> Result<Vec<ScreenEntry>, AppError> {
        let user_id = user_id.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ENTRIES)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([(
                "week_start",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
