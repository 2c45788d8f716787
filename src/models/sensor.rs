// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Home sensor readings shown on the dashboard.

use serde::{Deserialize, Serialize};

/// One reading pushed by a user's sensor kit. Any channel may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub user_id: u64,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// Relative humidity, percent
    pub humidity: Option<f64>,
    /// Lux
    pub light: Option<f64>,
    pub ph: Option<f64>,
    /// RFC3339, fixed width
    pub recorded_at: String,
}
