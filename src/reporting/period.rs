// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reporting period resolution.
//!
//! Converts a scope tag (`week`/`month`/`year`) plus its reference
//! parameter into a concrete inclusive date range. Weeks follow the
//! Sunday-start convention used throughout the app.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Granularity of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Week,
    Month,
    Year,
}

impl Scope {
    /// Parse a scope tag from a request parameter.
    pub fn parse(tag: &str) -> Result<Self, PeriodError> {
        match tag {
            "week" => Ok(Scope::Week),
            "month" => Ok(Scope::Month),
            "year" => Ok(Scope::Year),
            other => Err(PeriodError::InvalidScope(other.to_string())),
        }
    }

    /// Name of the request parameter that carries this scope's reference.
    pub fn reference_param(self) -> &'static str {
        match self {
            Scope::Week => "weekStart",
            Scope::Month => "month",
            Scope::Year => "year",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Week => write!(f, "week"),
            Scope::Month => write!(f, "month"),
            Scope::Year => write!(f, "year"),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DateRange {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end: NaiveDate,
}

/// Errors from period resolution. All are caller errors (HTTP 400).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("invalid scope '{0}': must be week, month, or year")]
    InvalidScope(String),

    #[error("'{0}' is required for this scope")]
    MissingReference(&'static str),

    #[error("invalid '{param}': {reason}")]
    InvalidReference {
        param: &'static str,
        reason: String,
    },
}

fn invalid(param: &'static str, reason: impl Into<String>) -> PeriodError {
    PeriodError::InvalidReference {
        param,
        reason: reason.into(),
    }
}

/// Resolve a scope plus its reference parameter into an inclusive range.
///
/// - `week`: reference is a Sunday `YYYY-MM-DD`; range is that Sunday
///   through the following Saturday.
/// - `month`: reference is `YYYY-MM`; range covers the whole calendar
///   month (variable length, leap-aware).
/// - `year`: reference is `YYYY`; range is Jan 1 through Dec 31.
pub fn resolve_range(scope: Scope, reference: Option<&str>) -> Result<DateRange, PeriodError> {
    let param = scope.reference_param();
    let reference = reference.ok_or(PeriodError::MissingReference(param))?;

    match scope {
        Scope::Week => {
            let start = NaiveDate::parse_from_str(reference, "%Y-%m-%d")
                .map_err(|_| invalid(param, "expected YYYY-MM-DD"))?;
            if start.weekday() != Weekday::Sun {
                return Err(invalid(param, "week start must be a Sunday"));
            }
            let end = start
                .checked_add_days(Days::new(6))
                .ok_or_else(|| invalid(param, "date out of range"))?;
            Ok(DateRange { start, end })
        }
        Scope::Month => {
            let (year, month) = reference
                .split_once('-')
                .ok_or_else(|| invalid(param, "expected YYYY-MM"))?;
            if year.len() != 4 || month.len() != 2 {
                return Err(invalid(param, "expected YYYY-MM"));
            }
            let year: i32 = year.parse().map_err(|_| invalid(param, "expected YYYY-MM"))?;
            let month: u32 = month.parse().map_err(|_| invalid(param, "expected YYYY-MM"))?;
            let start = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| invalid(param, "no such month"))?;
            let end = last_day_of_month(year, month)
                .ok_or_else(|| invalid(param, "no such month"))?;
            Ok(DateRange { start, end })
        }
        Scope::Year => {
            if reference.len() != 4 {
                return Err(invalid(param, "expected YYYY"));
            }
            let year: i32 = reference.parse().map_err(|_| invalid(param, "expected YYYY"))?;
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .ok_or_else(|| invalid(param, "no such year"))?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)
                .ok_or_else(|| invalid(param, "no such year"))?;
            Ok(DateRange { start, end })
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.checked_sub_days(Days::new(1))
}
