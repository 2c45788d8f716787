// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Progress, activity history and leaderboard routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::progress::{ActivityOutcome, RANK_UP_THRESHOLD};
use crate::time_utils::window_start;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_KIND_LEN: usize = 64;
const MAX_PER_PAGE: u32 = 50;
const MAX_STATS_DAYS: u32 = 365;
const MAX_LEADERBOARD: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(get_progress))
        .route(
            "/api/progress/activities",
            get(get_activities).post(record_activity),
        )
        .route("/api/progress/stats", get(get_stats))
        .route("/api/progress/leaderboard", get(get_leaderboard))
}

/// Validate and normalize an activity tag.
pub fn normalize_kind(raw: &str) -> Result<String> {
    let kind = raw.trim();
    if kind.is_empty() {
        return Err(AppError::BadRequest(
            "Activity kind must not be empty".to_string(),
        ));
    }
    if kind.chars().count() > MAX_KIND_LEN {
        return Err(AppError::BadRequest(format!(
            "Activity kind must be at most {} characters",
            MAX_KIND_LEN
        )));
    }
    Ok(kind.to_string())
}

// ─── Recording ───────────────────────────────────────────────

#[derive(Deserialize)]
struct RecordActivityRequest {
    kind: String,
}

async fn record_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<RecordActivityRequest>,
) -> Result<Json<ActivityOutcome>> {
    let kind = normalize_kind(&body.kind)?;
    let outcome = state.progress.record_activity(user.user_id, &kind).await?;
    Ok(Json(outcome))
}

// ─── Current Progress ────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressResponse {
    pub rank: u32,
    pub progress: u32,
    pub next_level: u32,
    pub percentage: u32,
}

/// Percentage toward the next rank, capped at 100.
fn percentage(progress: u32) -> u32 {
    (progress.saturating_mul(100) / RANK_UP_THRESHOLD).min(100)
}

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressResponse>> {
    let profile = state
        .db
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(ProgressResponse {
        rank: profile.rank,
        progress: profile.progress,
        next_level: RANK_UP_THRESHOLD,
        percentage: percentage(profile.progress),
    }))
}

// ─── History ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub id: String,
    pub kind: String,
    pub count: u32,
    pub points_awarded: u32,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub pages: u32,
    pub current_page: u32,
    pub per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub activities: Vec<ActivitySummary>,
    pub pagination: Pagination,
}

/// Number of pages needed for `total` items, saturating at `u32::MAX`.
fn page_count(total: usize, per_page: u32) -> u32 {
    let pages = total.div_ceil(per_page.max(1) as usize);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    let per_page = params.per_page.clamp(1, MAX_PER_PAGE);

    // Use checked multiplication to prevent overflow
    let offset = (params.page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    let (events, total) = state
        .db
        .get_activity_page(user.user_id, per_page, offset)
        .await?;

    let pages = page_count(total, per_page);

    Ok(Json(HistoryResponse {
        activities: events
            .into_iter()
            .map(|e| ActivitySummary {
                id: e.id,
                kind: e.kind,
                count: e.count,
                points_awarded: e.points_awarded,
                timestamp: e.recorded_at,
            })
            .collect(),
        pagination: Pagination {
            total,
            pages,
            current_page: params.page,
            per_page,
            has_next: params.page < pages,
            has_prev: params.page > 1,
        },
    }))
}

// ─── Stats ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct StatsQuery {
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    7
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub period_days: u32,
    pub total_points: u32,
    pub activity_counts: HashMap<String, u32>,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    if params.days == 0 || params.days > MAX_STATS_DAYS {
        return Err(AppError::BadRequest(format!(
            "'days' must be between 1 and {}",
            MAX_STATS_DAYS
        )));
    }

    let since = window_start(chrono::Utc::now(), params.days);
    let events = state
        .db
        .get_activities_since(user.user_id, &since)
        .await?;

    let mut activity_counts: HashMap<String, u32> = HashMap::new();
    let mut total_points = 0;
    for event in &events {
        *activity_counts.entry(event.kind.clone()).or_insert(0) += event.count;
        total_points += event.points_awarded;
    }

    Ok(Json(StatsResponse {
        period_days: params.days,
        total_points,
        activity_counts,
    }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default = "default_leaderboard_limit")]
    limit: u32,
}

fn default_leaderboard_limit() -> u32 {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub position: u32,
    pub user_id: u64,
    pub name: String,
    pub rank: u32,
    pub progress: u32,
}

async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let limit = params.limit.clamp(1, MAX_LEADERBOARD);
    let users = state.db.top_users(limit).await?;

    Ok(Json(
        users
            .into_iter()
            .zip(1..)
            .map(|(u, position)| LeaderboardEntry {
                position,
                user_id: u.id,
                name: u.name,
                rank: u.rank,
                progress: u.progress,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_kind_trims() {
        assert_eq!(normalize_kind("  carbon_check ").unwrap(), "carbon_check");
    }

    #[test]
    fn test_normalize_kind_rejects_blank_and_long() {
        assert!(matches!(normalize_kind("   "), Err(AppError::BadRequest(_))));
        let long = "k".repeat(MAX_KIND_LEN + 1);
        assert!(matches!(normalize_kind(&long), Err(AppError::BadRequest(_))));
        assert!(normalize_kind(&"k".repeat(MAX_KIND_LEN)).is_ok());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_page_count_does_not_wrap_past_u32() {
        // 2^32 + 5 items would read as 5 after an `as u32` cast.
        let total = (u32::MAX as usize) + 6;
        assert_eq!(page_count(total, 1), u32::MAX);
        assert_eq!(page_count(total, 2), (total / 2 + 1) as u32);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0), 0);
        assert_eq!(percentage(95), 95);
        assert_eq!(percentage(250), 100);
    }
}
