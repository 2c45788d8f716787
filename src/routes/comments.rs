// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Comment and reply routes for articles.
//!
//! Comments and replies are capped at [`MAX_WORDS`]. Authors are notified
//! when someone else comments on their article or replies to their comment.

use crate::error::{AppError, Result};
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::{Comment, Notification, Reply};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Word limit for comments and replies.
pub const MAX_WORDS: usize = 100;

const FALLBACK_NAME: &str = "Someone";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/comments/article/{id}",
            post(create_comment).get(list_comments),
        )
        .route("/api/comments/reply/{id}", post(create_reply).delete(delete_reply))
        .route("/api/comments/{id}", delete(delete_comment))
}

/// Trimmed content, rejected if blank or over the word limit.
fn checked_content(content: &str, what: &str) -> Result<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }
    if content.split_whitespace().count() > MAX_WORDS {
        return Err(AppError::BadRequest(format!(
            "{} cannot exceed {} words",
            what, MAX_WORDS
        )));
    }
    Ok(content.to_string())
}

async fn display_name(state: &AppState, user_id: u64) -> Result<String> {
    Ok(state
        .db
        .get_user(user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| FALLBACK_NAME.to_string()))
}

/// A comment with its replies, oldest reply first.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Reply>,
}

async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
) -> Result<Json<Vec<CommentThread>>> {
    if state.db.get_article(&article_id).await?.is_none() {
        return Err(AppError::NotFound("Article not found".to_string()));
    }

    let comments = state.db.get_comments(&article_id).await?;
    let mut threads = Vec::with_capacity(comments.len());
    for comment in comments {
        let replies = state.db.get_replies(&comment.id).await?;
        threads.push(CommentThread { comment, replies });
    }
    Ok(Json(threads))
}

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: String,
}

async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(article_id): Path<String>,
    Json(body): Json<ContentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let article = state
        .db
        .get_article(&article_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;
    let content = checked_content(&body.content, "Comment")?;

    let now = format_utc_rfc3339(chrono::Utc::now());
    let comment = Comment {
        id: new_document_id()?,
        article_id,
        user_id: user.user_id,
        content,
        created_at: now.clone(),
    };

    let notification = if article.user_id != user.user_id {
        let commenter = display_name(&state, user.user_id).await?;
        Some(Notification::new_comment(
            new_document_id()?,
            article.user_id,
            &commenter,
            &article.title,
            &now,
        ))
    } else {
        None
    };

    state
        .db
        .add_comment(&comment, notification.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

async fn create_reply(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<String>,
    Json(body): Json<ContentRequest>,
) -> Result<(StatusCode, Json<Reply>)> {
    let comment = state
        .db
        .get_comment(&comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    let content = checked_content(&body.content, "Reply")?;

    let now = format_utc_rfc3339(chrono::Utc::now());
    let reply = Reply {
        id: new_document_id()?,
        comment_id,
        user_id: user.user_id,
        content,
        created_at: now.clone(),
    };

    let notification = if comment.user_id != user.user_id {
        let replier = display_name(&state, user.user_id).await?;
        Some(Notification::new_reply(
            new_document_id()?,
            comment.user_id,
            &replier,
            &now,
        ))
    } else {
        None
    };

    state.db.add_reply(&reply, notification.as_ref()).await?;

    Ok((StatusCode::CREATED, Json(reply)))
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let comment = state
        .db
        .get_comment(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    if comment.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "Only the author can delete this comment".to_string(),
        ));
    }
    state.db.delete_comment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let reply = state
        .db
        .get_reply(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;
    if reply.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "Only the author can delete this reply".to_string(),
        ));
    }
    state.db.delete_reply(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
