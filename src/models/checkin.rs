// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-in record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A successful check-in. Immutable once created; at most one record
/// exists per (user, location) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub id: u64,
    pub user_id: u64,
    pub location_id: u64,
    pub created_at: DateTime<Utc>,
    /// Optional free-text note shown in the feed
    #[serde(default)]
    pub note: Option<String>,
    /// Optional image reference shown in the feed
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Feed entry: a check-in joined with its user and location names.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub location_id: u64,
    pub location_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
