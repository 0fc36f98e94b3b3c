// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the authenticated user: profile, locations, check-ins.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{achievement, LocationSummary};
use crate::services::progression::{self, LevelInfo};
use crate::services::CheckinAttempt;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/privacy", put(update_privacy))
        .route("/api/locations", get(get_locations))
        .route("/api/locations/{id}/checkin", post(post_checkin))
}

// ─── User Profile ────────────────────────────────────────────

/// An unlocked achievement with its display metadata.
#[derive(Serialize)]
pub struct AchievementView {
    pub code: String,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked_at: DateTime<Utc>,
}

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub points: u32,
    pub streak_days: u32,
    pub last_checkin_at: Option<DateTime<Utc>>,
    pub level: LevelInfo,
    pub achievements: Vec<AchievementView>,
    pub profile_public: bool,
    pub feed_public: bool,
}

/// Build the unlocked-achievement list for a user, oldest unlock first.
pub fn achievement_views(
    unlocked: &std::collections::HashMap<String, DateTime<Utc>>,
) -> Vec<AchievementView> {
    let mut views: Vec<AchievementView> = unlocked
        .iter()
        .filter_map(|(code, &unlocked_at)| {
            achievement::by_code(code).map(|def| AchievementView {
                code: code.clone(),
                name: def.name,
                description: def.description,
                icon: def.icon,
                unlocked_at,
            })
        })
        .collect();
    views.sort_by(|a, b| a.unlocked_at.cmp(&b.unlocked_at).then(a.code.cmp(&b.code)));
    views
}

/// Get current user profile with derived level info.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let user = state
        .db
        .get_user(auth.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        points: user.points,
        streak_days: user.streak_days,
        last_checkin_at: user.last_checkin_at,
        level: progression::level_info(user.points),
        achievements: achievement_views(&user.achievements),
        profile_public: user.profile_public,
        feed_public: user.feed_public,
    }))
}

// ─── Privacy Flags ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct PrivacyUpdate {
    pub profile_public: Option<bool>,
    pub feed_public: Option<bool>,
}

/// Update the caller's privacy flags. The only user-writable fields.
async fn update_privacy(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(update): Json<PrivacyUpdate>,
) -> Result<Json<MeResponse>> {
    // Under the user lock so a concurrent check-in commit is not clobbered.
    let lock = state.db.user_lock(auth.user_id);
    let _guard = lock.lock().await;

    let mut user = state
        .db
        .get_user(auth.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))?;

    if let Some(profile_public) = update.profile_public {
        user.profile_public = profile_public;
    }
    if let Some(feed_public) = update.feed_public {
        user.feed_public = feed_public;
    }
    state.db.upsert_user(&user);

    tracing::info!(
        user_id = user.id,
        profile_public = user.profile_public,
        feed_public = user.feed_public,
        "Privacy flags updated"
    );

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        points: user.points,
        streak_days: user.streak_days,
        last_checkin_at: user.last_checkin_at,
        level: progression::level_info(user.points),
        achievements: achievement_views(&user.achievements),
        profile_public: user.profile_public,
        feed_public: user.feed_public,
    }))
}

// ─── Locations ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationSummary>,
    pub total: u32,
    pub visited: u32,
}

/// List active locations with the caller's visited flags.
async fn get_locations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<LocationsResponse>> {
    let visited_ids: std::collections::HashSet<u64> = state
        .db
        .visited_location_ids(auth.user_id)
        .into_iter()
        .collect();

    let locations: Vec<LocationSummary> = state
        .registry
        .locations()
        .iter()
        .filter(|l| l.active)
        .map(|l| LocationSummary {
            id: l.id,
            name: l.name.clone(),
            latitude: l.latitude,
            longitude: l.longitude,
            category: l.category.clone(),
            visited: visited_ids.contains(&l.id),
        })
        .collect();

    let total = locations.len() as u32;
    let visited = locations.iter().filter(|l| l.visited).count() as u32;

    Ok(Json(LocationsResponse {
        locations,
        total,
        visited,
    }))
}

// ─── Check-in ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(max = 500))]
    pub note: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Attempt a check-in at a location.
///
/// Geofence rejections come back as 200 with `accepted: false` and a
/// reason code; malformed bodies are 400.
async fn post_checkin(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(location_id): Path<u64>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<crate::services::CheckinOutcome>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = state
        .engine
        .checkin(
            CheckinAttempt {
                user_id: auth.user_id,
                location_id,
                latitude: payload.latitude,
                longitude: payload.longitude,
                note: payload.note,
                image_url: payload.image_url,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(outcome))
}
