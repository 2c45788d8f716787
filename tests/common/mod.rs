// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

use axum::body::Body;
use axum::http::{header, Request};
use ecosphere::config::Config;
use ecosphere::db::{Db, FirestoreDb, MemoryStore};
use ecosphere::middleware::auth::create_jwt;
use ecosphere::models::User;
use ecosphere::routes::create_router;
use ecosphere::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router, the shared state and the store itself.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    create_test_app_with(Config::test_default())
}

/// Same as [`create_test_app`], with a custom config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = Arc::new(AppState::new(config, Db::from_memory(store.clone())));

    (create_router(state.clone()), state, store)
}

/// Seed a user with the given progress and rank.
#[allow(dead_code)]
pub fn seed_user(store: &MemoryStore, id: u64, progress: u32, rank: u32) -> User {
    let mut user = User::new(
        id,
        format!("User {}", id),
        None,
        false,
        "2025-01-01T00:00:00.000000Z",
    );
    user.progress = progress;
    user.rank = rank;
    store.upsert_user(&user).expect("seed user");
    user
}

/// Session token for `user_id`, signed with the test key.
#[allow(dead_code)]
pub fn test_token(user_id: u64) -> String {
    create_jwt(user_id, &Config::test_default().jwt_signing_key, 1).expect("create JWT")
}

/// Build an authenticated request with an optional JSON body.
#[allow(dead_code)]
pub fn authed(method: &str, uri: &str, user_id: u64, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", test_token(user_id)));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
