// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feed assembly and privacy gating tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use waypoints_api::AppState;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Make `a` and `b` friends directly through the store.
fn befriend(state: &AppState, a: u64, b: u64) {
    state.db.insert_friendship(a, b);
}

/// Record an accepted check-in for `user_id` at `location_id`.
async fn checkin(state: &AppState, user_id: u64, location_id: u64, lat: f64, lon: f64) {
    state
        .engine
        .checkin(
            waypoints_api::services::CheckinAttempt {
                user_id,
                location_id,
                latitude: lat,
                longitude: lon,
                note: None,
                image_url: None,
            },
            chrono::Utc::now(),
        )
        .await
        .expect("check-in succeeds");
}

#[tokio::test]
async fn test_feed_contains_own_and_friend_checkins() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    common::provision_user(&state, 2, "bob");
    befriend(&state, 1, 2);

    checkin(&state, 1, 1, 52.516275, 13.377704).await;
    checkin(&state, 2, 2, 52.5145, 13.35).await;

    let alice = common::session_token(&state, 1);
    let body = body_json(app.oneshot(get("/api/feed", &alice)).await.unwrap()).await;
    let items = body["items"].as_array().unwrap();

    assert_eq!(items.len(), 2);
    let usernames: Vec<&str> = items
        .iter()
        .map(|i| i["username"].as_str().unwrap())
        .collect();
    assert!(usernames.contains(&"alice"));
    assert!(usernames.contains(&"bob"));
    // Newest first
    assert!(items[0]["created_at"].as_str() >= items[1]["created_at"].as_str());
}

#[tokio::test]
async fn test_private_feed_friend_is_excluded() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    let mut bob = common::provision_user(&state, 2, "bob");
    bob.feed_public = false;
    state.db.upsert_user(&bob);
    befriend(&state, 1, 2);

    checkin(&state, 2, 2, 52.5145, 13.35).await;

    let alice = common::session_token(&state, 1);
    let body = body_json(app.oneshot(get("/api/feed", &alice)).await.unwrap()).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_friend_checkins_never_appear() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    common::provision_user(&state, 2, "bob");
    // No friendship
    checkin(&state, 2, 2, 52.5145, 13.35).await;

    let alice = common::session_token(&state, 1);
    let body = body_json(app.oneshot(get("/api/feed", &alice)).await.unwrap()).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_own_checkins_appear_even_with_private_feed() {
    let (app, state) = common::create_test_app();
    let mut alice = common::provision_user(&state, 1, "alice");
    alice.feed_public = false;
    state.db.upsert_user(&alice);

    checkin(&state, 1, 1, 52.516275, 13.377704).await;

    let token = common::session_token(&state, 1);
    let body = body_json(app.oneshot(get("/api/feed", &token)).await.unwrap()).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_profile_hides_stats_and_feed_from_strangers() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    let mut bob = common::provision_user(&state, 2, "bob");
    bob.profile_public = false;
    state.db.upsert_user(&bob);

    checkin(&state, 2, 2, 52.5145, 13.35).await;

    let alice = common::session_token(&state, 1);
    let response = app.oneshot(get("/api/users/2/profile", &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], json!("bob"));
    assert_eq!(body["profile_visible"], json!(false));
    assert_eq!(body["feed_visible"], json!(false));
    assert!(body.get("points").is_none());
    assert!(body.get("level").is_none());
    assert!(body.get("checkins").is_none());
}

#[tokio::test]
async fn test_profile_shows_feed_to_friends() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    common::provision_user(&state, 2, "bob");
    befriend(&state, 1, 2);

    checkin(&state, 2, 2, 52.5145, 13.35).await;

    let alice = common::session_token(&state, 1);
    let body = body_json(app.oneshot(get("/api/users/2/profile", &alice)).await.unwrap()).await;

    assert_eq!(body["relation"], json!("friends"));
    assert_eq!(body["feed_visible"], json!(true));
    assert_eq!(body["points"], json!(1));
    assert_eq!(body["level"]["level"], json!(1));
    assert_eq!(body["checkins"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_privacy_update_round_trips() {
    let (app, state) = common::create_test_app();
    common::provision_user(&state, 1, "alice");
    let token = common::session_token(&state, 1);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/me/privacy")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"feed_public": false}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["feed_public"], json!(false));
    assert_eq!(body["profile_public"], json!(true));
    assert!(!state.db.get_user(1).unwrap().feed_public);
}
