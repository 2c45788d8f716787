// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with microseconds and a `Z` suffix.
///
/// The fixed width keeps stored timestamps sortable as plain strings.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Calendar day key ("YYYY-MM-DD") in UTC.
pub fn day_key(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Stored timestamp for the start of the window `days` before `now`.
pub fn window_start(now: DateTime<Utc>, days: u32) -> String {
    format_utc_rfc3339(now - Duration::days(i64::from(days)))
}
