// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip CRUD: user-curated travel entries.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Trip;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips).post(create_trip))
        .route("/api/trips/{id}", put(update_trip).delete(delete_trip))
}

#[derive(Deserialize, Validate)]
pub struct TripForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[validate(url)]
    pub cover_image_url: Option<String>,
}

fn default_public() -> bool {
    true
}

impl TripForm {
    fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(AppError::Validation("INVALID_DATE_RANGE"));
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct TripsResponse {
    pub trips: Vec<Trip>,
}

#[derive(Serialize)]
pub struct TripResponse {
    pub trip: Trip,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// List the caller's trips, newest first.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TripsResponse>> {
    Ok(Json(TripsResponse {
        trips: state.db.trips_for_user(auth.user_id),
    }))
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(form): Json<TripForm>,
) -> Result<Json<TripResponse>> {
    form.check()?;

    let now = Utc::now();
    let trip = Trip {
        id: state.db.next_trip_id(),
        user_id: auth.user_id,
        name: form.name.trim().to_string(),
        description: form.description.filter(|d| !d.is_empty()),
        start_date: form.start_date,
        end_date: form.end_date,
        is_public: form.is_public,
        cover_image_url: form.cover_image_url.filter(|u| !u.is_empty()),
        created_at: now,
        updated_at: now,
    };
    state.db.upsert_trip(&trip);

    tracing::info!(trip_id = trip.id, user_id = auth.user_id, "Trip created");
    Ok(Json(TripResponse { trip }))
}

/// Update an owned trip. Someone else's trip is indistinguishable from
/// a missing one.
async fn update_trip(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(trip_id): Path<u64>,
    Json(form): Json<TripForm>,
) -> Result<Json<TripResponse>> {
    form.check()?;

    let mut trip = state
        .db
        .get_trip(trip_id)
        .filter(|t| t.user_id == auth.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;

    trip.name = form.name.trim().to_string();
    trip.description = form.description.filter(|d| !d.is_empty());
    trip.start_date = form.start_date;
    trip.end_date = form.end_date;
    trip.is_public = form.is_public;
    trip.cover_image_url = form.cover_image_url.filter(|u| !u.is_empty());
    trip.updated_at = Utc::now();
    state.db.upsert_trip(&trip);

    Ok(Json(TripResponse { trip }))
}

async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(trip_id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    state
        .db
        .get_trip(trip_id)
        .filter(|t| t.user_id == auth.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Trip {trip_id} not found")))?;

    state.db.delete_trip(trip_id);
    tracing::info!(trip_id, user_id = auth.user_id, "Trip deleted");
    Ok(Json(DeleteResponse { success: true }))
}
