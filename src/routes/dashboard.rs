// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Sensor dashboard routes: the latest home reading and new readings.
//!
//! Readings are informational and earn no progress.

use crate::error::{AppError, Result};
use crate::id_utils::new_document_id;
use crate::middleware::auth::AuthUser;
use crate::models::SensorReading;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard/stats", get(get_stats).post(add_reading))
}

/// Latest reading, or a message when the user has none yet.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Reading(SensorReading),
    Empty { message: String },
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardStats>> {
    let stats = match state.db.latest_sensor_reading(user.user_id).await? {
        Some(reading) => DashboardStats::Reading(reading),
        None => DashboardStats::Empty {
            message: "No Data Available".to_string(),
        },
    };
    Ok(Json(stats))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SensorReadingRequest {
    #[validate(range(min = -100.0, max = 100.0))]
    pub temperature: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub light: Option<f64>,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: Option<f64>,
}

async fn add_reading(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SensorReadingRequest>,
) -> Result<(StatusCode, Json<SensorReading>)> {
    body.validate()?;
    if body.temperature.is_none()
        && body.humidity.is_none()
        && body.light.is_none()
        && body.ph.is_none()
    {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    let reading = SensorReading {
        id: new_document_id()?,
        user_id: user.user_id,
        temperature: body.temperature,
        humidity: body.humidity,
        light: body.light,
        ph: body.ph,
        recorded_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.add_sensor_reading(&reading).await?;

    Ok((StatusCode::CREATED, Json(reading)))
}
