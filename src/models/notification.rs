// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

use serde::{Deserialize, Serialize};

/// Notification delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: u64,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    /// RFC3339, fixed width
    pub created_at: String,
}

impl Notification {
    /// Notification announcing a promotion to `rank`.
    pub fn rank_up(id: String, user_id: u64, name: &str, rank: u32, now: &str) -> Self {
        Self {
            id,
            user_id,
            title: format!("Rank up! You reached rank {}", rank),
            message: format!(
                "Congratulations {}, you are now rank {}. Keep up the eco-friendly habits!",
                name, rank
            ),
            is_read: false,
            created_at: now.to_string(),
        }
    }

    /// Tell an article's author that someone commented on it.
    pub fn new_comment(
        id: String,
        owner_id: u64,
        commenter: &str,
        article_title: &str,
        now: &str,
    ) -> Self {
        Self {
            id,
            user_id: owner_id,
            title: "New Comment".to_string(),
            message: format!("{} commented on your article: {}", commenter, article_title),
            is_read: false,
            created_at: now.to_string(),
        }
    }

    /// Tell a comment's author that someone replied.
    pub fn new_reply(id: String, owner_id: u64, replier: &str, now: &str) -> Self {
        Self {
            id,
            user_id: owner_id,
            title: "New Reply".to_string(),
            message: format!("{} replied to your comment", replier),
            is_read: false,
            created_at: now.to_string(),
        }
    }
}
