// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Vitamin D / UV exposure records.

use serde::{Deserialize, Serialize};

/// A stored sun-exposure estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitaminRecord {
    pub id: String,
    pub user_id: u64,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub uv_index: f64,
    /// Fitzpatrick skin type (1-6)
    pub skin_type: u8,
    /// UV risk band ("Low", "Moderate", ...)
    pub risk: String,
    /// Suggested exposure, None when the sun is too weak to matter
    pub suggested_minutes: Option<u32>,
    /// RFC3339, fixed width
    pub created_at: String,
}
