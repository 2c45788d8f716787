// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Vitamin D logging routes.
//!
//! The client supplies the UV index it already fetched; the server only
//! classifies, stores and rewards it.

use crate::error::Result;
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::VitaminRecord;
use crate::services::vitamin::{safe_exposure_minutes, UvRisk, DEFAULT_SKIN_TYPE};
use crate::services::ActivityOutcome;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Activity kind recorded for each vitamin D check.
pub const VITAMIN_ACTIVITY: &str = "vitamin_check";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/vitamin/records", get(get_records).post(add_record))
}

async fn get_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<VitaminRecord>>> {
    Ok(Json(state.db.get_vitamin_records(user.user_id).await?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct VitaminRequest {
    #[validate(range(min = 0.0, max = 25.0))]
    pub uv_index: f64,
    #[validate(range(min = 1, max = 6))]
    pub skin_type: Option<u8>,
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct VitaminResponse {
    pub record: VitaminRecord,
    pub activity: ActivityOutcome,
}

async fn add_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<VitaminRequest>,
) -> Result<(StatusCode, Json<VitaminResponse>)> {
    body.validate()?;

    let skin_type = body.skin_type.unwrap_or(DEFAULT_SKIN_TYPE);
    let record = VitaminRecord {
        id: new_document_id()?,
        user_id: user.user_id,
        city: body.city,
        latitude: body.lat,
        longitude: body.lon,
        uv_index: body.uv_index,
        skin_type,
        risk: UvRisk::from_uv_index(body.uv_index).label().to_string(),
        suggested_minutes: safe_exposure_minutes(body.uv_index, skin_type),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    // Activity first: if its commit fails, no record is stored.
    let activity = state
        .progress
        .record_activity(user.user_id, VITAMIN_ACTIVITY)
        .await?;
    state.db.add_vitamin_record(&record).await?;

    Ok((StatusCode::CREATED, Json(VitaminResponse { record, activity })))
}
