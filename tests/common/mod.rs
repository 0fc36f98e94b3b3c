// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use waypoints_api::config::Config;
use waypoints_api::db::Store;
use waypoints_api::models::User;
use waypoints_api::routes::create_router;
use waypoints_api::services::{CheckinEngine, FriendGraph, LocationRegistry};
use waypoints_api::AppState;

/// A small catalog used by the route tests. Location 1 is active and
/// covers Brandenburger Tor with a 150 m radius; location 2 is a park
/// on the other side of town; location 3 is inactive.
pub const TEST_CATALOG: &str = r#"{
    "locations": [
        {"id": 1, "name": "Brandenburger Tor", "latitude": 52.516275,
         "longitude": 13.377704, "radius_m": 150, "category": "landmark"},
        {"id": 2, "name": "Tiergarten", "latitude": 52.5145,
         "longitude": 13.35, "radius_m": 400, "category": "park"},
        {"id": 3, "name": "Closed Field", "latitude": 52.4736,
         "longitude": 13.4018, "radius_m": 500, "category": "park",
         "active": false}
    ],
    "missions": [
        {"id": 1, "name": "First Steps", "goal": "TOTAL_CHECKINS", "target": 5},
        {"id": 3, "name": "Warming Up", "goal": "STREAK_DAYS", "target": 3}
    ]
}"#;

/// Create a test app with an in-memory store and the test catalog.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Store::new();
    let registry = LocationRegistry::load_from_json(TEST_CATALOG).expect("test catalog loads");

    let engine = CheckinEngine::new(db.clone(), registry.clone());
    let friends = FriendGraph::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        registry,
        engine,
        friends,
    });

    (create_router(state.clone()), state)
}

/// Provision a user row directly, the way the external identity
/// provider would on first login.
#[allow(dead_code)]
pub fn provision_user(state: &AppState, id: u64, username: &str) -> User {
    let mut user = User::new(id, username, chrono::Utc::now());
    user.email = Some(format!("{username}@example.com"));
    state.db.upsert_user(&user);
    user
}

/// Create a session JWT signed with the state's key.
#[allow(dead_code)]
pub fn session_token(state: &AppState, user_id: u64) -> String {
    waypoints_api::middleware::auth::create_jwt(user_id, &state.config.jwt_signing_key)
        .expect("jwt creation")
}
