// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Carbon footprint log entries.

use serde::{Deserialize, Serialize};

/// One carbon footprint entry, in kg CO2e per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonLog {
    pub id: String,
    pub user_id: u64,
    pub transport: f64,
    pub food: f64,
    pub energy: f64,
    /// Sum of the three categories
    pub total: f64,
    /// RFC3339, fixed width
    pub logged_at: String,
}

impl CarbonLog {
    pub fn new(id: String, user_id: u64, transport: f64, food: f64, energy: f64, now: &str) -> Self {
        Self {
            id,
            user_id,
            transport,
            food,
            energy,
            total: transport + food + energy,
            logged_at: now.to_string(),
        }
    }
}
