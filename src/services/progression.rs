// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Level progression math.
//!
//! Levels follow a triangular progression: level n takes 3n points to
//! complete, so level n starts at the cumulative boundary
//! 3·n·(n-1)/2. Evaluated closed-form in O(1) rather than looping.

use serde::Serialize;

/// Derived level information for a cumulative point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: u32,
    pub title: &'static str,
    pub points_into_level: u32,
    /// Points this level takes in total (3 · level)
    pub points_required_for_level: u32,
    pub remaining_to_next_level: u32,
}

/// Cumulative point total at which `level` starts. Widened to `u64`:
/// near `u32::MAX` points the product `3·n·(n-1)` exceeds `u32`.
fn boundary(level: u32) -> u64 {
    let n = level as u64;
    3 * n * (n - 1) / 2
}

/// Coarse title banding over level ranges. Band edges are presentation
/// only and do not affect point accounting.
fn title_for(level: u32) -> &'static str {
    match level {
        1..=2 => "Newcomer",
        3..=5 => "Seasoned Explorer",
        6..=9 => "Veteran Explorer",
        _ => "Legendary Explorer",
    }
}

/// Compute level, title and progress toward the next level.
///
/// Holds for `total_points = 0` (level 1, 0 into level) and never
/// divides by zero.
pub fn level_info(total_points: u32) -> LevelInfo {
    // boundary(n) <= p  <=>  n <= (1 + sqrt(1 + 8p/3)) / 2
    let p = total_points as f64;
    let mut level = ((1.0 + (1.0 + 8.0 * p / 3.0).sqrt()) / 2.0).floor() as u32;
    level = level.max(1);

    // Nudge across float rounding at exact triangular boundaries.
    let points = total_points as u64;
    while boundary(level + 1) <= points {
        level += 1;
    }
    while level > 1 && boundary(level) > points {
        level -= 1;
    }

    // boundary(level) <= points <= u32::MAX, so the difference fits
    let points_into_level = (points - boundary(level)) as u32;
    let points_required_for_level = 3 * level;

    LevelInfo {
        level,
        title: title_for(level),
        points_into_level,
        points_required_for_level,
        remaining_to_next_level: points_required_for_level - points_into_level,
    }
}
