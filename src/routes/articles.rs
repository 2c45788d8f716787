// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Article routes. Any signed-in user can read; only the author can edit or delete.

use crate::error::{AppError, Result};
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::Article;
use crate::services::ActivityOutcome;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Activity kind recorded when an article is published.
pub const ARTICLE_CREATE_ACTIVITY: &str = "article_create";

/// Activity kind recorded when an article is edited.
pub const ARTICLE_UPDATE_ACTIVITY: &str = "article_update";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/user", get(list_my_articles))
        .route(
            "/api/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Article not found".to_string())
}

async fn list_articles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Article>>> {
    Ok(Json(state.db.get_articles().await?))
}

async fn list_my_articles(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Article>>> {
    Ok(Json(state.db.get_user_articles(user.user_id).await?))
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>> {
    let article = state.db.get_article(&id).await?.ok_or_else(not_found)?;
    Ok(Json(article))
}

/// Load an article for editing. Someone else's article reads as missing.
async fn owned_article(state: &AppState, user_id: u64, id: &str) -> Result<Article> {
    state
        .db
        .get_article(id)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or_else(not_found)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 50000))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
    pub activity: ActivityOutcome,
}

async fn create_article(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>)> {
    body.validate()?;
    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let now = format_utc_rfc3339(chrono::Utc::now());
    let article = Article {
        id: new_document_id()?,
        user_id: user.user_id,
        title: body.title.trim().to_string(),
        content: body.content,
        created_at: now.clone(),
        updated_at: now,
    };

    // Activity first: if its commit fails, no article is stored.
    let activity = state
        .progress
        .record_activity(user.user_id, ARTICLE_CREATE_ACTIVITY)
        .await?;
    state.db.set_article(&article).await?;

    Ok((
        StatusCode::CREATED,
        Json(ArticleResponse { article, activity }),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub content: Option<String>,
}

async fn update_article(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>> {
    body.validate()?;
    if body.title.is_none() && body.content.is_none() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    let mut article = owned_article(&state, user.user_id, &id).await?;
    if let Some(title) = body.title.filter(|t| !t.trim().is_empty()) {
        article.title = title.trim().to_string();
    }
    if let Some(content) = body.content.filter(|c| !c.trim().is_empty()) {
        article.content = content;
    }
    article.updated_at = format_utc_rfc3339(chrono::Utc::now());

    let activity = state
        .progress
        .record_activity(user.user_id, ARTICLE_UPDATE_ACTIVITY)
        .await?;
    state.db.set_article(&article).await?;

    Ok(Json(ArticleResponse { article, activity }))
}

async fn delete_article(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.db.delete_article(user.user_id, &id).await? {
        return Err(not_found());
    }
    tracing::info!(user_id = user.user_id, article_id = %id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}
