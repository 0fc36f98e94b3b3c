// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geofence validation: admit or reject a claimed position against a
//! location's circular admission zone.

use crate::models::Location;

/// Mean Earth radius in meters, matching the distance math used by the
/// map frontend.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tolerance for the admission comparison. A position constructed to sit
/// exactly on the radius must not be rejected by float rounding; one
/// meter beyond the radius is still rejected by nine orders of magnitude.
const BOUNDARY_TOLERANCE_M: f64 = 1e-6;

/// Why a check-in attempt was refused before any state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OutOfRange,
    InvalidCoordinates,
    LocationInactive,
}

impl RejectReason {
    /// Stable reason code surfaced to API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::OutOfRange => "OUT_OF_RANGE",
            RejectReason::InvalidCoordinates => "INVALID_COORDINATES",
            RejectReason::LocationInactive => "LOCATION_INACTIVE",
        }
    }
}

/// Validate a claimed position against a location's geofence.
///
/// Admits iff both coordinates are finite, the location is active, and the
/// great-circle distance to the center is within the admission radius.
/// Ties exactly at the boundary are admitted.
pub fn validate(claimed_lat: f64, claimed_lon: f64, location: &Location) -> Result<(), RejectReason> {
    if !claimed_lat.is_finite() || !claimed_lon.is_finite() {
        return Err(RejectReason::InvalidCoordinates);
    }
    if !location.active {
        return Err(RejectReason::LocationInactive);
    }

    let distance = haversine_m(claimed_lat, claimed_lon, location.latitude, location.longitude);
    if distance <= location.radius_m as f64 + BOUNDARY_TOLERANCE_M {
        Ok(())
    } else {
        Err(RejectReason::OutOfRange)
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_location(lat: f64, lon: f64, radius_m: u32, active: bool) -> Location {
        Location {
            id: 1,
            name: "Test Spot".to_string(),
            latitude: lat,
            longitude: lon,
            radius_m,
            category: "landmark".to_string(),
            active,
        }
    }

    /// Longitude offset (degrees) that is exactly `meters` along the equator.
    fn equator_lon_offset(meters: f64) -> f64 {
        (meters / EARTH_RADIUS_M).to_degrees()
    }

    #[test]
    fn test_inside_radius_admitted() {
        let location = make_location(0.0, 0.0, 100, true);
        let lon = equator_lon_offset(50.0);
        assert_eq!(validate(0.0, lon, &location), Ok(()));
    }

    #[test]
    fn test_exact_boundary_admitted() {
        let location = make_location(0.0, 0.0, 100, true);
        let lon = equator_lon_offset(100.0);
        assert_eq!(validate(0.0, lon, &location), Ok(()));
    }

    #[test]
    fn test_one_meter_beyond_rejected() {
        let location = make_location(0.0, 0.0, 100, true);
        let lon = equator_lon_offset(101.0);
        assert_eq!(validate(0.0, lon, &location), Err(RejectReason::OutOfRange));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let location = make_location(52.52, 13.405, 100, true);
        assert_eq!(
            validate(f64::NAN, 13.405, &location),
            Err(RejectReason::InvalidCoordinates)
        );
        assert_eq!(
            validate(52.52, f64::INFINITY, &location),
            Err(RejectReason::InvalidCoordinates)
        );
    }

    #[test]
    fn test_inactive_location_rejected_even_at_center() {
        let location = make_location(52.52, 13.405, 100, false);
        assert_eq!(
            validate(52.52, 13.405, &location),
            Err(RejectReason::LocationInactive)
        );
    }

    #[test]
    fn test_haversine_known_distance() {
        // Berlin -> Hamburg is roughly 255 km
        let d = haversine_m(52.52, 13.405, 53.5511, 9.9937);
        assert!((250_000.0..260_000.0).contains(&d), "got {}", d);
    }

    #[test]
    fn test_reason_codes_stable() {
        assert_eq!(RejectReason::OutOfRange.code(), "OUT_OF_RANGE");
        assert_eq!(RejectReason::InvalidCoordinates.code(), "INVALID_COORDINATES");
        assert_eq!(RejectReason::LocationInactive.code(), "LOCATION_INACTIVE");
    }
}
