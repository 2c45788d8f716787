// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Feature route tests: every tracked action goes through the progress engine.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_record_activity_endpoint_awards_once_per_day() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 42, 90, 3);

    let first = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/progress/activities",
            42,
            Some(json!({ "kind": "carbon_check" })),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = common::body_json(first).await;
    assert_eq!(first["points_awarded"], 5);
    assert_eq!(first["progress"], 95);
    assert_eq!(first["rank"], 3);

    let second = app
        .oneshot(common::authed(
            "POST",
            "/api/progress/activities",
            42,
            Some(json!({ "kind": "  carbon_check " })),
        ))
        .await
        .unwrap();
    let second = common::body_json(second).await;
    assert_eq!(second["points_awarded"], 0);
    assert_eq!(second["progress"], 95);
    assert_eq!(second["kind"], "carbon_check");
}

#[tokio::test]
async fn test_record_activity_rejects_blank_kind() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 1, 0, 1);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/progress/activities",
            1,
            Some(json!({ "kind": "   " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_carbon_log_records_check_and_rank_up_notifies() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 42, 95, 3);

    let response = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/carbon/logs",
            42,
            Some(json!({ "transport": 12.5, "food": 4.0, "energy": 3.5 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["log"]["total"], 20.0);
    assert_eq!(body["activity"]["kind"], "carbon_check");
    assert_eq!(body["activity"]["ranked_up"], true);
    assert_eq!(body["activity"]["rank"], 4);
    assert_eq!(body["activity"]["progress"], 0);

    let count = app
        .clone()
        .oneshot(common::authed("GET", "/api/notifications/count", 42, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(count).await["count"], 1);

    let logs = app
        .oneshot(common::authed("GET", "/api/carbon/logs", 42, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(logs).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_carbon_log_rejects_negative_values() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 2, 0, 1);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/carbon/logs",
            2,
            Some(json!({ "transport": -1.0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vitamin_record_computes_risk_and_awards_points() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 3, 0, 1);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/vitamin/records",
            3,
            Some(json!({ "uv_index": 7.0, "city": "Lisbon" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["record"]["risk"], "High");
    assert_eq!(body["record"]["skin_type"], 3);
    assert_eq!(body["activity"]["kind"], "vitamin_check");
    assert_eq!(body["activity"]["points_awarded"], 5);
}

#[tokio::test]
async fn test_vitamin_record_rejects_out_of_range_uv() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 3, 0, 1);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/vitamin/records",
            3,
            Some(json!({ "uv_index": 40.0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notes_crud_and_ownership() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 10, 0, 1);
    common::seed_user(&store, 20, 0, 1);

    let created = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/notes",
            10,
            Some(json!({ "title": "Compost", "content": "Turn the pile weekly" })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = common::body_json(created).await;
    assert_eq!(created["points_awarded"], 5);
    let id = created["id"].as_str().unwrap().to_string();

    // Another user can neither read nor delete it.
    let foreign = app
        .clone()
        .oneshot(common::authed("GET", &format!("/api/notes/{}", id), 20, None))
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let foreign_delete = app
        .clone()
        .oneshot(common::authed("DELETE", &format!("/api/notes/{}", id), 20, None))
        .await
        .unwrap();
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let updated = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            &format!("/api/notes/{}", id),
            10,
            Some(json!({ "title": "Compost tips" })),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(common::body_json(updated).await["title"], "Compost tips");

    let deleted = app
        .clone()
        .oneshot(common::authed("DELETE", &format!("/api/notes/{}", id), 10, None))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .oneshot(common::authed("GET", &format!("/api/notes/{}", id), 10, None))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_update_records_activity() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 30, 10, 1);

    let response = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            "/api/me",
            30,
            Some(json!({ "name": "Moss" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["name"], "Moss");
    assert_eq!(body["progress"], 15);

    let empty = app
        .oneshot(common::authed("PUT", "/api/me", 30, Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notifications_mark_read_flow() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 50, 95, 1);
    state.progress.record_activity(50, "post").await.unwrap();

    let unread = app
        .clone()
        .oneshot(common::authed("GET", "/api/notifications/unread", 50, None))
        .await
        .unwrap();
    let unread = common::body_json(unread).await;
    let list = unread.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["read"], false);
    let id = list[0]["id"].as_str().unwrap().to_string();

    // Someone else's ID is not found for this user.
    let missing = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            &format!("/api/notifications/{}/read", id),
            51,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let marked = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            &format!("/api/notifications/{}/read", id),
            50,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(marked.status(), StatusCode::OK);

    let count = app
        .clone()
        .oneshot(common::authed("GET", "/api/notifications/count", 50, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(count).await["count"], 0);

    let all = app
        .clone()
        .oneshot(common::authed("GET", "/api/notifications", 50, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(all).await[0]["read"], true);

    let read_all = app
        .oneshot(common::authed("PUT", "/api/notifications/read-all", 50, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(read_all).await["updated"], 0);
}

#[tokio::test]
async fn test_history_pagination() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 60, 0, 1);
    for kind in ["a", "b", "c", "d", "e"] {
        state.progress.record_activity(60, kind).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(common::authed(
            "GET",
            "/api/progress/activities?page=2&per_page=2",
            60,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["activities"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["pagination"]["pages"], 3);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["has_prev"], true);

    let zero = app
        .oneshot(common::authed(
            "GET",
            "/api/progress/activities?page=0",
            60,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_sum_points_and_counts() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 70, 0, 1);
    state.progress.record_activity(70, "carbon_check").await.unwrap();
    state.progress.record_activity(70, "carbon_check").await.unwrap();
    state.progress.record_activity(70, "post").await.unwrap();

    let response = app
        .clone()
        .oneshot(common::authed("GET", "/api/progress/stats?days=7", 70, None))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["period_days"], 7);
    assert_eq!(body["total_points"], 10);
    assert_eq!(body["activity_counts"]["carbon_check"], 2);
    assert_eq!(body["activity_counts"]["post"], 1);

    let invalid = app
        .oneshot(common::authed("GET", "/api/progress/stats?days=0", 70, None))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leaderboard_orders_by_rank_then_progress() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 1, 80, 2);
    common::seed_user(&store, 2, 10, 5);
    common::seed_user(&store, 3, 90, 2);

    let response = app
        .oneshot(common::authed(
            "GET",
            "/api/progress/leaderboard?limit=2",
            1,
            None,
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["user_id"], 2);
    assert_eq!(entries[0]["position"], 1);
    assert_eq!(entries[1]["user_id"], 3);
}

#[tokio::test]
async fn test_delete_account_removes_everything() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 90, 95, 1);
    state.progress.record_activity(90, "post").await.unwrap();

    let response = app
        .clone()
        .oneshot(common::authed("DELETE", "/api/account", 90, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["success"], true);
    // user + event + rank-up notification
    assert_eq!(body["deleted_records"], 3);

    let me = app
        .oneshot(common::authed("GET", "/api/me", 90, None))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_activity_commit_stores_no_log() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 44, 0, 1);
    store.set_fail_commits(true);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/carbon/logs",
            44,
            Some(json!({ "transport": 1.5 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(state.db.get_carbon_logs(44).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_update_writes_only_profile_fields() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 31, 40, 6);

    let response = app
        .oneshot(common::authed(
            "PUT",
            "/api/me",
            31,
            Some(json!({ "name": "  Lichen  ", "email": "lichen@example.com" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["name"], "Lichen");
    assert_eq!(body["progress"], 45);
    assert_eq!(body["rank"], 6);

    let user = state.db.get_user(31).await.unwrap().unwrap();
    assert_eq!(user.email.as_deref(), Some("lichen@example.com"));
    assert_eq!((user.progress, user.rank), (45, 6));
}

#[tokio::test]
async fn test_profile_update_for_deleted_account_is_not_found() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::authed(
            "PUT",
            "/api/me",
            404,
            Some(json!({ "name": "Ghost" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ═══════════════════════════════════════════════════════════════════════════
// ARTICLES AND COMMENTS
// ═══════════════════════════════════════════════════════════════════════════

async fn publish(app: &axum::Router, user_id: u64, title: &str) -> String {
    let response = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/articles",
            user_id,
            Some(json!({ "title": title, "content": "Plant natives." })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await["article"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_article_crud_records_activities() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 70, 0, 1);
    common::seed_user(&store, 71, 0, 1);

    let created = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/articles",
            70,
            Some(json!({ "title": "Rain gardens", "content": "Dig a shallow bed." })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = common::body_json(created).await;
    assert_eq!(created["activity"]["kind"], "article_create");
    assert_eq!(created["activity"]["points_awarded"], 5);
    let id = created["article"]["id"].as_str().unwrap().to_string();

    // Anyone signed in can read; only the author can edit.
    let read = app
        .clone()
        .oneshot(common::authed("GET", &format!("/api/articles/{}", id), 71, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(read).await["title"], "Rain gardens");

    let foreign_edit = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            &format!("/api/articles/{}", id),
            71,
            Some(json!({ "title": "Mine now" })),
        ))
        .await
        .unwrap();
    assert_eq!(foreign_edit.status(), StatusCode::NOT_FOUND);

    let edit = app
        .clone()
        .oneshot(common::authed(
            "PUT",
            &format!("/api/articles/{}", id),
            70,
            Some(json!({ "title": "Rain gardens, revised" })),
        ))
        .await
        .unwrap();
    assert_eq!(edit.status(), StatusCode::OK);
    let edit = common::body_json(edit).await;
    assert_eq!(edit["article"]["title"], "Rain gardens, revised");
    assert_eq!(edit["article"]["content"], "Dig a shallow bed.");
    assert_eq!(edit["activity"]["kind"], "article_update");

    let mine = app
        .clone()
        .oneshot(common::authed("GET", "/api/articles/user", 71, None))
        .await
        .unwrap();
    assert_eq!(common::body_json(mine).await, json!([]));

    let foreign_delete = app
        .clone()
        .oneshot(common::authed("DELETE", &format!("/api/articles/{}", id), 71, None))
        .await
        .unwrap();
    assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

    let delete = app
        .clone()
        .oneshot(common::authed("DELETE", &format!("/api/articles/{}", id), 70, None))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);
    assert!(state.db.get_articles().await.unwrap().is_empty());

    let user = state.db.get_user(70).await.unwrap().unwrap();
    assert_eq!(user.progress, 10);
}

#[tokio::test]
async fn test_article_requires_title_and_content() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 72, 0, 1);

    let response = app
        .oneshot(common::authed(
            "POST",
            "/api/articles",
            72,
            Some(json!({ "title": "  ", "content": "Text" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_notifies_article_author_only() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 80, 0, 1);
    common::seed_user(&store, 81, 0, 1);
    let article_id = publish(&app, 80, "Composting").await;

    let comment = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/article/{}", article_id),
            81,
            Some(json!({ "content": "Great tips" })),
        ))
        .await
        .unwrap();
    assert_eq!(comment.status(), StatusCode::CREATED);
    let comment_id = common::body_json(comment).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let notifications = state.db.get_notifications(80, false).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "New Comment");
    assert_eq!(
        notifications[0].message,
        "User 81 commented on your article: Composting"
    );

    // Commenting on your own article is silent.
    let own = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/article/{}", article_id),
            80,
            Some(json!({ "content": "Thanks for reading" })),
        ))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::CREATED);
    assert_eq!(state.db.get_notifications(80, false).await.unwrap().len(), 1);

    // The author replies; the commenter hears about it.
    let reply = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/reply/{}", comment_id),
            80,
            Some(json!({ "content": "Glad it helped" })),
        ))
        .await
        .unwrap();
    assert_eq!(reply.status(), StatusCode::CREATED);
    let replies = state.db.get_notifications(81, false).await.unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].title, "New Reply");
    assert_eq!(replies[0].message, "User 80 replied to your comment");

    let threads = app
        .oneshot(common::authed(
            "GET",
            &format!("/api/comments/article/{}", article_id),
            81,
            None,
        ))
        .await
        .unwrap();
    let threads = common::body_json(threads).await;
    let threads = threads.as_array().unwrap();
    assert_eq!(threads.len(), 2);
    let commented = threads.iter().find(|t| t["id"] == comment_id.as_str()).unwrap();
    assert_eq!(commented["replies"][0]["content"], "Glad it helped");
}

#[tokio::test]
async fn test_comment_word_limit_and_missing_article() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 82, 0, 1);
    let article_id = publish(&app, 82, "Bees").await;

    let long = vec!["buzz"; 101].join(" ");
    let too_long = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/article/{}", article_id),
            82,
            Some(json!({ "content": long })),
        ))
        .await
        .unwrap();
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(too_long).await;
    assert_eq!(body["details"], "Comment cannot exceed 100 words");

    let missing = app
        .oneshot(common::authed(
            "POST",
            "/api/comments/article/nope",
            82,
            Some(json!({ "content": "Hello" })),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_authors_delete_comments_and_replies() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 83, 0, 1);
    common::seed_user(&store, 84, 0, 1);
    let article_id = publish(&app, 83, "Solar").await;

    let comment = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/article/{}", article_id),
            84,
            Some(json!({ "content": "Which panels?" })),
        ))
        .await
        .unwrap();
    let comment_id = common::body_json(comment).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let reply = app
        .clone()
        .oneshot(common::authed(
            "POST",
            &format!("/api/comments/reply/{}", comment_id),
            83,
            Some(json!({ "content": "Monocrystalline" })),
        ))
        .await
        .unwrap();
    let reply_id = common::body_json(reply).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let forbidden = app
        .clone()
        .oneshot(common::authed(
            "DELETE",
            &format!("/api/comments/reply/{}", reply_id),
            84,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let forbidden = app
        .clone()
        .oneshot(common::authed(
            "DELETE",
            &format!("/api/comments/{}", comment_id),
            83,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Deleting the comment takes its replies with it.
    let deleted = app
        .clone()
        .oneshot(common::authed(
            "DELETE",
            &format!("/api/comments/{}", comment_id),
            84,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert!(state.db.get_reply(&reply_id).await.unwrap().is_none());

    let missing = app
        .oneshot(common::authed(
            "DELETE",
            &format!("/api/comments/reply/{}", reply_id),
            83,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ═══════════════════════════════════════════════════════════════════════════
// SENSOR DASHBOARD
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_dashboard_returns_latest_reading() {
    let (app, state, store) = common::create_test_app();
    common::seed_user(&store, 95, 0, 1);

    let empty = app
        .clone()
        .oneshot(common::authed("GET", "/api/dashboard/stats", 95, None))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(
        common::body_json(empty).await,
        json!({ "message": "No Data Available" })
    );

    let posted = app
        .clone()
        .oneshot(common::authed(
            "POST",
            "/api/dashboard/stats",
            95,
            Some(json!({ "temperature": 21.5, "humidity": 48.0, "light": 300.0, "ph": 6.5 })),
        ))
        .await
        .unwrap();
    assert_eq!(posted.status(), StatusCode::CREATED);

    let latest = app
        .oneshot(common::authed("GET", "/api/dashboard/stats", 95, None))
        .await
        .unwrap();
    let latest = common::body_json(latest).await;
    assert_eq!(latest["temperature"], 21.5);
    assert_eq!(latest["ph"], 6.5);

    // Readings earn nothing.
    let (_, total) = state.db.get_activity_page(95, 10, 0).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_dashboard_rejects_out_of_range_readings() {
    let (app, _, store) = common::create_test_app();
    common::seed_user(&store, 96, 0, 1);

    for body in [json!({ "ph": 15.0 }), json!({ "humidity": -1.0 }), json!({})] {
        let response = app
            .clone()
            .oneshot(common::authed("POST", "/api/dashboard/stats", 96, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
