// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Activity event model: the append-only history behind progress.

use serde::{Deserialize, Serialize};

/// Stored activity event.
///
/// Every call to record an activity writes one of these, whether or not it
/// earned points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Document ID
    pub id: String,
    /// Owning user
    pub user_id: u64,
    /// Free-form activity tag ("carbon_check", "vitamin_check", "post", ...)
    pub kind: String,
    /// UTC calendar day of the event ("YYYY-MM-DD"), used for daily dedup
    pub day: String,
    /// When the event was recorded (RFC3339, fixed width)
    pub recorded_at: String,
    /// Occurrence count carried by this event
    pub count: u32,
    /// Points this event earned (0 for repeats and unknown users)
    #[serde(default)]
    pub points_awarded: u32,
}
