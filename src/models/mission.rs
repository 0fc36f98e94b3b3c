// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mission definitions and per-user progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a mission counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionGoal {
    TotalCheckins,
    StreakDays,
}

/// A configurable goal, defined in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: u64,
    pub name: String,
    pub goal: MissionGoal,
    /// Target value; must be > 0
    pub target: u32,
}

/// Per-user progress toward one mission.
///
/// Progress is derived from the user's counters, never set directly.
/// Completion is one-way: once `completed` is set it stays set even if
/// the underlying counter (a broken streak) later drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionProgress {
    pub mission_id: u64,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MissionProgress {
    pub fn new(mission_id: u64) -> Self {
        Self {
            mission_id,
            progress: 0,
            completed: false,
            completed_at: None,
        }
    }
}

/// Mission state as surfaced in check-in results and profile views.
#[derive(Debug, Clone, Serialize)]
pub struct MissionSnapshot {
    pub id: u64,
    pub name: String,
    pub progress: u32,
    pub target: u32,
    pub percent: u32,
    pub completed: bool,
}
