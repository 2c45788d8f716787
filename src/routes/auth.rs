// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Session routes: guest sign-up and logout.

use crate::error::{AppError, Result};
use crate::id_utils::new_user_id;
use crate::middleware::auth::{create_jwt, session_token, verify_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::routes::users::UserResponse;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

const DEFAULT_GUEST_NAME: &str = "Eco Explorer";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/guest", post(create_guest))
        .route("/api/auth/logout", post(logout))
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct GuestRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Whether cookies must carry the `Secure` flag.
fn secure_cookies(state: &AppState) -> bool {
    state.config.frontend_url.starts_with("https://")
}

/// Create a guest account and start a session for it.
async fn create_guest(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<GuestRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_GUEST_NAME)
        .to_string();

    let now = format_utc_rfc3339(chrono::Utc::now());
    let user = User::new(new_user_id()?, name, body.email, true, &now);
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = user.id, "Guest account created");

    let token = create_jwt(
        user.id,
        &state.config.jwt_signing_key,
        state.config.session_ttl_days,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure_cookies(&state))
        .max_age(time::Duration::days(state.config.session_ttl_days));

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(SessionResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Clear the session cookie. A guest account is deleted on the way out,
/// since nothing could sign back into it.
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(user_id) = session_token(&jar, &headers)
        .and_then(|token| verify_jwt(&token, &state.config.jwt_signing_key))
    {
        if let Some(user) = state.db.get_user(user_id).await? {
            if user.guest {
                let deleted = state.progress.delete_user(user_id).await?;
                tracing::info!(user_id, deleted, "Guest account purged on logout");
            }
        }
    }

    let removal = Cookie::build(SESSION_COOKIE)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure_cookies(&state));

    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}
