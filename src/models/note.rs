// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

use serde::{Deserialize, Serialize};

/// Personal note owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub user_id: u64,
    pub title: String,
    pub content: String,
    /// RFC3339, fixed width
    pub created_at: String,
}
