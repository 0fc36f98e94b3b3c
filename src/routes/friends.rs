// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friend graph routes: search, requests, and public profiles.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{FeedItem, Relation, RelationInfo};
use crate::routes::api::{achievement_views, AchievementView};
use crate::services::progression::{self, LevelInfo};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/friends", get(get_friends))
        .route("/api/friends/search", get(search_users))
        .route("/api/friends/requests", post(send_request))
        .route("/api/friends/requests/{id}/accept", post(accept_request))
        .route("/api/friends/requests/{id}/reject", post(reject_request))
        .route("/api/users/{id}/profile", get(get_profile))
}

// ─── Friend List ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct FriendView {
    pub id: u64,
    pub username: String,
    pub streak_days: u32,
    pub points: u32,
}

#[derive(Serialize)]
pub struct FriendsResponse {
    pub friends: Vec<FriendView>,
}

async fn get_friends(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<FriendsResponse>> {
    let mut friends: Vec<FriendView> = state
        .friends
        .friends_of(auth.user_id)
        .into_iter()
        .map(|u| FriendView {
            id: u.id,
            username: u.username,
            streak_days: u.streak_days,
            points: u.points,
        })
        .collect();
    friends.sort_by(|a, b| a.username.cmp(&b.username));

    Ok(Json(FriendsResponse { friends }))
}

// ─── User Search ─────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 64))]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub id: u64,
    pub username: String,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub users: Vec<SearchResult>,
}

/// Search users by username substring, disclosing the caller's
/// relation to each result so the UI can offer the right action.
async fn search_users(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    query
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let q = query.q.trim();
    if q.is_empty() {
        return Ok(Json(SearchResponse { users: Vec::new() }));
    }

    let users = state
        .db
        .search_users(q, auth.user_id)
        .into_iter()
        .map(|u| {
            let RelationInfo {
                relation,
                request_id,
            } = state.friends.relation(auth.user_id, u.id);
            SearchResult {
                id: u.id,
                username: u.username,
                relation,
                request_id,
            }
        })
        .collect();

    Ok(Json(SearchResponse { users }))
}

// ─── Friend Requests ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendRequestBody {
    pub friend_id: u64,
}

#[derive(Serialize)]
pub struct SendRequestResponse {
    pub request_id: u64,
}

async fn send_request(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<SendRequestBody>,
) -> Result<Json<SendRequestResponse>> {
    let request = state.friends.send_request(auth.user_id, body.friend_id).await?;

    Ok(Json(SendRequestResponse {
        request_id: request.id,
    }))
}

#[derive(Serialize)]
pub struct RequestActionResponse {
    pub success: bool,
}

async fn accept_request(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(request_id): Path<u64>,
) -> Result<Json<RequestActionResponse>> {
    state.friends.accept(request_id, auth.user_id).await?;
    Ok(Json(RequestActionResponse { success: true }))
}

async fn reject_request(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(request_id): Path<u64>,
) -> Result<Json<RequestActionResponse>> {
    state.friends.reject(request_id, auth.user_id).await?;
    Ok(Json(RequestActionResponse { success: true }))
}

// ─── Public Profile ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: u64,
    pub username: String,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
    pub profile_visible: bool,
    pub feed_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checkin_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<AchievementView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checkins: Vec<FeedItem>,
}

/// View another user's profile. Stats are only disclosed when the
/// subject's profile is public, the viewer is a friend, or the viewer
/// is looking at themselves; the check-in history additionally follows
/// the feed visibility rule.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(subject_id): Path<u64>,
) -> Result<Json<ProfileResponse>> {
    let subject = state
        .db
        .get_user(subject_id)
        .ok_or_else(|| AppError::NotFound(format!("User {subject_id} not found")))?;

    let RelationInfo {
        relation,
        request_id,
    } = state.friends.relation(auth.user_id, subject_id);

    let profile_visible = matches!(relation, Relation::Myself | Relation::Friends)
        || subject.profile_public;
    let feed_visible = state.friends.can_see_feed(auth.user_id, &subject);

    let checkins = if feed_visible {
        state
            .db
            .checkins_for_user(subject_id)
            .into_iter()
            .take(50)
            .filter_map(|c| {
                state.registry.get_location(c.location_id).map(|l| FeedItem {
                    id: c.id,
                    user_id: subject.id,
                    username: subject.username.clone(),
                    location_id: l.id,
                    location_name: l.name.clone(),
                    created_at: c.created_at,
                    note: c.note,
                    image_url: c.image_url,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(ProfileResponse {
        id: subject.id,
        username: subject.username.clone(),
        relation,
        request_id,
        profile_visible,
        feed_visible,
        points: profile_visible.then_some(subject.points),
        streak_days: profile_visible.then_some(subject.streak_days),
        level: profile_visible.then(|| progression::level_info(subject.points)),
        last_checkin_at: if profile_visible {
            subject.last_checkin_at
        } else {
            None
        },
        achievements: if profile_visible {
            achievement_views(&subject.achievements)
        } else {
            Vec::new()
        },
        checkins,
    }))
}
