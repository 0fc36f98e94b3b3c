// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point-of-interest model.

use serde::{Deserialize, Serialize};

/// A point of interest with its circular geofence.
///
/// Owned by the catalog (administrative side); the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    /// Display name (e.g., "Brandenburger Tor")
    pub name: String,
    /// Geofence center, signed decimal degrees
    pub latitude: f64,
    pub longitude: f64,
    /// Admission radius in meters
    pub radius_m: u32,
    /// Category tag (landmark, culture, nature, park, water, urban, unique)
    pub category: String,
    /// Inactive locations reject all check-ins
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Location summary for API responses, with the caller's visited flag.
#[derive(Debug, Clone, Serialize)]
pub struct LocationSummary {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    pub visited: bool,
}
