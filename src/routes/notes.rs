// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Personal notes routes.

use crate::error::{AppError, Result};
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::Note;
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

/// Activity kind recorded when a note is created.
pub const NOTE_ACTIVITY: &str = "post";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Note not found".to_string())
}

async fn list_notes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Note>>> {
    Ok(Json(state.db.get_notes(user.user_id).await?))
}

async fn get_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let note = state
        .db
        .get_note(user.user_id, &id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(note))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 20000))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub id: String,
    pub points_awarded: u32,
}

async fn create_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreateNoteResponse>)> {
    body.validate()?;

    let note = Note {
        id: new_document_id()?,
        user_id: user.user_id,
        title: body.title,
        content: body.content,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    // Activity first: if its commit fails, no note is stored.
    let outcome = state
        .progress
        .record_activity(user.user_id, NOTE_ACTIVITY)
        .await?;
    state.db.set_note(&note).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteResponse {
            id: note.id,
            points_awarded: outcome.points_awarded,
        }),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 20000))]
    pub content: Option<String>,
}

async fn update_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<Json<Note>> {
    body.validate()?;
    if body.title.is_none() && body.content.is_none() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    let mut note = state
        .db
        .get_note(user.user_id, &id)
        .await?
        .ok_or_else(not_found)?;

    if let Some(title) = body.title {
        note.title = title;
    }
    if let Some(content) = body.content {
        note.content = content;
    }
    state.db.set_note(&note).await?;

    Ok(Json(note))
}

async fn delete_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.db.delete_note(user.user_id, &id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
