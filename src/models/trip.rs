// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-curated trip model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of travel, owned and edited by one user.
///
/// Trips are free-form: dates and cover image are optional, and no
/// linkage to check-ins is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: u64,
    pub user_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub is_public: bool,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
