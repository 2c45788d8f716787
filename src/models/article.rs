// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Articles and their comment threads.

use serde::{Deserialize, Serialize};

/// A published article. Readable by every signed-in user, editable by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub user_id: u64,
    pub title: String,
    pub content: String,
    /// RFC3339, fixed width
    pub created_at: String,
    pub updated_at: String,
}

/// Top-level comment on an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
}

/// Reply to a comment. Replies do not nest further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub comment_id: String,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
}
