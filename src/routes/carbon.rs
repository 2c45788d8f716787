// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Carbon footprint logging routes.

use crate::error::Result;
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::CarbonLog;
use crate::services::ActivityOutcome;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Activity kind recorded for each carbon log.
pub const CARBON_ACTIVITY: &str = "carbon_check";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/carbon/logs", get(get_logs).post(add_log))
}

async fn get_logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CarbonLog>>> {
    Ok(Json(state.db.get_carbon_logs(user.user_id).await?))
}

/// Emissions in kg CO2e per category.
#[derive(Debug, Deserialize, Validate)]
pub struct CarbonLogRequest {
    #[validate(range(min = 0.0, max = 100000.0))]
    #[serde(default)]
    pub transport: f64,
    #[validate(range(min = 0.0, max = 100000.0))]
    #[serde(default)]
    pub food: f64,
    #[validate(range(min = 0.0, max = 100000.0))]
    #[serde(default)]
    pub energy: f64,
}

#[derive(Debug, Serialize)]
pub struct CarbonLogResponse {
    pub log: CarbonLog,
    pub activity: ActivityOutcome,
}

async fn add_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CarbonLogRequest>,
) -> Result<(StatusCode, Json<CarbonLogResponse>)> {
    body.validate()?;

    let log = CarbonLog::new(
        new_document_id()?,
        user.user_id,
        body.transport,
        body.food,
        body.energy,
        &format_utc_rfc3339(chrono::Utc::now()),
    );

    // Activity first: if its commit fails, no log is stored.
    let activity = state
        .progress
        .record_activity(user.user_id, CARBON_ACTIVITY)
        .await?;
    state.db.add_carbon_log(&log).await?;

    Ok((StatusCode::CREATED, Json(CarbonLogResponse { log, activity })))
}
