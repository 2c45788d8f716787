// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Notification inbox routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Notification;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/notifications", get(list_all))
        .route("/api/notifications/unread", get(list_unread))
        .route("/api/notifications/count", get(unread_count))
        .route("/api/notifications/read-all", put(mark_all_read))
        .route("/api/notifications/{id}/read", put(mark_read))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            read: n.is_read,
            created_at: n.created_at,
        }
    }
}

async fn list(state: &AppState, user_id: u64, unread_only: bool) -> Result<Vec<NotificationResponse>> {
    Ok(state
        .db
        .get_notifications(user_id, unread_only)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect())
}

async fn list_all(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<NotificationResponse>>> {
    Ok(Json(list(&state, user.user_id, false).await?))
}

async fn list_unread(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<NotificationResponse>>> {
    Ok(Json(list(&state, user.user_id, true).await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: usize,
}

async fn unread_count(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CountResponse>> {
    let count = state.db.get_notifications(user.user_id, true).await?.len();
    Ok(Json(CountResponse { count }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub updated: usize,
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>> {
    if !state.db.mark_notification_read(user.user_id, &id).await? {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(MarkReadResponse { updated: 1 }))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MarkReadResponse>> {
    let updated = state.db.mark_all_notifications_read(user.user_id).await?;
    tracing::debug!(user_id = user.user_id, updated, "Marked notifications read");
    Ok(Json(MarkReadResponse { updated }))
}
