// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod entry;
pub mod user;

pub use entry::{ScreenEntry, MAX_WEEK_HOURS};
pub use user::User;
