// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-in orchestration.
//!
//! Single entry point for recording a check-in:
//! 1. Resolve the location and fail fast if inactive
//! 2. Validate the claimed position against the geofence
//! 3. Detect idempotent re-check-ins (zero point delta)
//! 4. Advance points, streak, achievements and missions
//! 5. Commit everything, or nothing, per user
//!
//! The whole mutation sequence runs under the user's lock: counters are
//! read, the full result is computed, and writes happen only at the end,
//! so a failure mid-sequence leaves no partial state behind.

use crate::db::Store;
use crate::error::AppError;
use crate::models::{CheckinRecord, MissionSnapshot};
use crate::services::registry::LocationRegistry;
use crate::services::{achievements, geo, missions, streak};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Externally observable result of a check-in attempt.
#[derive(Debug, Clone, Serialize)]
pub struct CheckinOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub new_achievements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missions: Vec<MissionSnapshot>,
}

impl CheckinOutcome {
    fn rejected(reason: &'static str) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            points: None,
            streak_days: None,
            new_achievements: Vec::new(),
            missions: Vec::new(),
        }
    }
}

/// A check-in request as the engine sees it.
#[derive(Debug, Clone)]
pub struct CheckinAttempt {
    pub user_id: u64,
    pub location_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub note: Option<String>,
    pub image_url: Option<String>,
}

/// The check-in engine, composing the geofence, progression, streak,
/// achievement and mission components over the shared store.
#[derive(Clone)]
pub struct CheckinEngine {
    db: Store,
    registry: LocationRegistry,
}

impl CheckinEngine {
    pub fn new(db: Store, registry: LocationRegistry) -> Self {
        Self { db, registry }
    }

    /// Record a check-in attempt at `now`.
    ///
    /// Geofence rejections return an outcome with `accepted: false` and a
    /// reason code, with no state mutated. Unknown users or locations are
    /// errors, not rejections.
    pub async fn checkin(
        &self,
        attempt: CheckinAttempt,
        now: DateTime<Utc>,
    ) -> Result<CheckinOutcome, AppError> {
        let location = self
            .registry
            .get_location(attempt.location_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Location {} not found", attempt.location_id))
            })?
            .clone();

        if !location.active {
            return Ok(CheckinOutcome::rejected("LOCATION_INACTIVE"));
        }
        if let Err(reason) = geo::validate(attempt.latitude, attempt.longitude, &location) {
            tracing::debug!(
                user_id = attempt.user_id,
                location_id = location.id,
                reason = reason.code(),
                "Check-in rejected by geofence"
            );
            return Ok(CheckinOutcome::rejected(reason.code()));
        }

        // Serialize the counter read-modify-write per user. Concurrent
        // check-ins by different users are independent.
        let lock = self.db.user_lock(attempt.user_id);
        let _guard = lock.lock().await;

        let mut user = self
            .db
            .get_user(attempt.user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", attempt.user_id)))?;

        let new_streak = streak::advance(user.last_checkin_at, now, user.streak_days)
            .map_err(|_| AppError::Validation("INVALID_TIMESTAMP"))?;

        // One point per distinct location; a re-check-in still counts as
        // activity today but awards nothing.
        let already_visited = self.db.checkin_for(attempt.user_id, location.id).is_some();
        let new_points = if already_visited {
            user.points
        } else {
            user.points + 1
        };

        let counters = achievements::ProgressCounters {
            total_checkins: new_points,
            streak_days: new_streak,
        };

        let newly_unlocked = achievements::evaluate(&counters, &user.achievements);

        let mut mission_updates = Vec::with_capacity(self.registry.missions().len());
        for mission in self.registry.missions() {
            let previous = self
                .db
                .mission_progress(attempt.user_id, mission.id)
                .unwrap_or_else(|| crate::models::MissionProgress::new(mission.id));
            let updated = missions::advance(mission, &counters, previous, now);
            mission_updates.push((mission, updated));
        }

        // Everything computed; commit as one unit under the lock.
        user.points = new_points;
        user.streak_days = new_streak;
        user.last_checkin_at = Some(now);
        for code in &newly_unlocked {
            user.achievements.insert((*code).to_string(), now);
        }
        self.db.upsert_user(&user);

        if !already_visited {
            let record = CheckinRecord {
                id: self.db.next_checkin_id(),
                user_id: attempt.user_id,
                location_id: location.id,
                created_at: now,
                note: attempt.note.filter(|n| !n.is_empty()),
                image_url: attempt.image_url.filter(|u| !u.is_empty()),
            };
            self.db.insert_checkin(&record);
        }

        let snapshots: Vec<MissionSnapshot> = mission_updates
            .iter()
            .map(|(mission, progress)| {
                self.db.set_mission_progress(attempt.user_id, progress);
                missions::snapshot(mission, progress)
            })
            .collect();

        tracing::info!(
            user_id = attempt.user_id,
            location_id = location.id,
            points = new_points,
            streak = new_streak,
            new_achievements = ?newly_unlocked,
            repeat_visit = already_visited,
            "Check-in recorded"
        );

        Ok(CheckinOutcome {
            accepted: true,
            reason: None,
            points: Some(new_points),
            streak_days: Some(new_streak),
            new_achievements: newly_unlocked.iter().map(|c| c.to_string()).collect(),
            missions: snapshots,
        })
    }
}
