// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Profile and account routes for authenticated users.

use crate::db::ProfileChanges;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Activity kind recorded when a profile is edited.
pub const PROFILE_UPDATE_ACTIVITY: &str = "profile_update";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/account", delete(delete_account))
}

/// Current user response.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub progress: u32,
    pub rank: u32,
    pub guest: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            progress: user.progress,
            rank: user.rank,
            guest: user.guest,
        }
    }
}

async fn load_user(state: &AppState, user_id: u64) -> Result<User> {
    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    Ok(Json(load_user(&state, user.user_id).await?.into()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub avatar: Option<String>,
}

/// Update profile fields. Progress and rank are not editable here.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    body.validate()?;

    let name = match body.name {
        Some(name) if name.trim().is_empty() => {
            return Err(AppError::BadRequest("Name must not be blank".to_string()));
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };
    let changes = ProfileChanges {
        name,
        email: body.email,
        avatar: body.avatar,
    };
    if changes.is_empty() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    // Only the edited fields are written; progress and rank stay with the engine.
    let mut profile = state
        .db
        .update_profile(user.user_id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    // Points and rank come back from the engine's own write.
    let outcome = state
        .progress
        .record_activity(user.user_id, PROFILE_UPDATE_ACTIVITY)
        .await?;
    if let (Some(progress), Some(rank)) = (outcome.progress, outcome.rank) {
        profile.progress = progress;
        profile.rank = rank;
    }

    Ok(Json(profile.into()))
}

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_records: usize,
}

/// Delete the account and everything it owns.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = user.user_id, "User-initiated account deletion");

    let deleted_records = state.progress.delete_user(user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_records,
    }))
}
