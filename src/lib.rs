// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Screentime-Tracker: log weekly screen time, compare, and compete
//!
//! This crate provides the backend API for recording weekly screen-time
//! entries and computing metrics, streaks, and the low-usage leaderboard.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod reporting;
pub mod routes;
pub mod week;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
