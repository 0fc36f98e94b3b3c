// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog loading: locations and mission definitions.

use crate::models::{Location, Mission};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk catalog format.
#[derive(Deserialize)]
struct CatalogFile {
    locations: Vec<Location>,
    missions: Vec<Mission>,
}

/// Read-only registry of locations and missions, loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    by_id: HashMap<u64, usize>,
    missions: Vec<Mission>,
}

impl LocationRegistry {
    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the catalog from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let catalog: CatalogFile =
            serde_json::from_str(json_data).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut by_id = HashMap::new();
        for (index, location) in catalog.locations.iter().enumerate() {
            if by_id.insert(location.id, index).is_some() {
                return Err(CatalogError::DuplicateLocationId(location.id));
            }
        }

        for mission in &catalog.missions {
            if mission.target == 0 {
                return Err(CatalogError::ZeroTarget(mission.id));
            }
        }

        tracing::info!(
            locations = catalog.locations.len(),
            missions = catalog.missions.len(),
            "Loaded catalog"
        );

        Ok(Self {
            locations: catalog.locations,
            by_id,
            missions: catalog.missions,
        })
    }

    /// All locations, active or not.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Look up a location by id.
    pub fn get_location(&self, id: u64) -> Option<&Location> {
        self.by_id.get(&id).map(|&index| &self.locations[index])
    }

    /// All active mission definitions.
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Duplicate location id in catalog: {0}")]
    DuplicateLocationId(u64),

    #[error("Mission {0} has a zero target")]
    ZeroTarget(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "locations": [
            {"id": 1, "name": "Spot A", "latitude": 52.5, "longitude": 13.4,
             "radius_m": 100, "category": "landmark"},
            {"id": 2, "name": "Spot B", "latitude": 48.1, "longitude": 11.6,
             "radius_m": 150, "category": "park", "active": false}
        ],
        "missions": [
            {"id": 10, "name": "Collector", "goal": "TOTAL_CHECKINS", "target": 5}
        ]
    }"#;

    #[test]
    fn test_load_minimal_catalog() {
        let registry = LocationRegistry::load_from_json(MINIMAL).unwrap();

        assert_eq!(registry.locations().len(), 2);
        assert_eq!(registry.missions().len(), 1);
        assert!(registry.get_location(1).unwrap().active);
        assert!(!registry.get_location(2).unwrap().active);
        assert!(registry.get_location(99).is_none());
    }

    #[test]
    fn test_duplicate_location_id_rejected() {
        let json = r#"{
            "locations": [
                {"id": 1, "name": "A", "latitude": 0, "longitude": 0,
                 "radius_m": 10, "category": "urban"},
                {"id": 1, "name": "B", "latitude": 0, "longitude": 0,
                 "radius_m": 10, "category": "urban"}
            ],
            "missions": []
        }"#;

        let err = LocationRegistry::load_from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLocationId(1)));
    }

    #[test]
    fn test_zero_target_mission_rejected() {
        let json = r#"{
            "locations": [],
            "missions": [{"id": 1, "name": "Broken", "goal": "STREAK_DAYS", "target": 0}]
        }"#;

        let err = LocationRegistry::load_from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::ZeroTarget(1)));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(LocationRegistry::load_from_json("not json").is_err());
    }
}
