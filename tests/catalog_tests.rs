// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sanity checks for the shipped catalog file.

use waypoints_api::services::LocationRegistry;

#[test]
fn test_shipped_catalog_loads() {
    let registry = LocationRegistry::load_from_file("data/catalog.json")
        .expect("data/catalog.json must parse");

    assert!(!registry.locations().is_empty());
    assert!(!registry.missions().is_empty());
}

#[test]
fn test_shipped_catalog_is_sane() {
    let registry = LocationRegistry::load_from_file("data/catalog.json").unwrap();

    for location in registry.locations() {
        assert!((-90.0..=90.0).contains(&location.latitude), "{}", location.name);
        assert!(
            (-180.0..=180.0).contains(&location.longitude),
            "{}",
            location.name
        );
        assert!(location.radius_m > 0, "{}", location.name);
        assert!(!location.name.is_empty());
    }

    for mission in registry.missions() {
        assert!(mission.target > 0, "mission {}", mission.id);
    }
}
