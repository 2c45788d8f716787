// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Rank assigned to a freshly created account.
pub const INITIAL_RANK: u32 = 1;

/// User profile stored in Firestore.
///
/// `progress` and `rank` are owned by the progress engine; profile edits
/// never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: u64,
    /// Email address (may be None for guests)
    pub email: Option<String>,
    /// Display name
    pub name: String,
    /// Avatar URL
    pub avatar: Option<String>,
    /// Points toward the next rank (0-99 between rank-ups)
    #[serde(default)]
    pub progress: u32,
    /// Current rank tier, starts at 1 and never decreases
    #[serde(default = "default_rank")]
    pub rank: u32,
    /// Account created without credentials
    #[serde(default)]
    pub guest: bool,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

fn default_rank() -> u32 {
    INITIAL_RANK
}

impl User {
    /// New account at rank 1 with no progress.
    pub fn new(id: u64, name: String, email: Option<String>, guest: bool, now: &str) -> Self {
        Self {
            id,
            email,
            name,
            avatar: None,
            progress: 0,
            rank: INITIAL_RANK,
            guest,
            created_at: now.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_progress_fields_use_defaults() {
        let json = r#"{"id":7,"email":null,"name":"Ada","avatar":null,"created_at":"2025-01-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.progress, 0);
        assert_eq!(user.rank, INITIAL_RANK);
        assert!(!user.guest);
    }
}
