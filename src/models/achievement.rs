// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalog.
//!
//! Codes are stable identifiers; display strings may change, codes never do.

use serde::Serialize;

/// What a predicate checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRule {
    /// Total distinct check-ins >= threshold
    TotalCheckins(u32),
    /// Current streak length >= threshold
    StreakDays(u32),
}

/// A permanent, predicate-triggered unlock.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(skip)]
    pub rule: UnlockRule,
}

/// The fixed achievement table. Predicates are monotone: counters only
/// increase, so a previously true predicate never becomes false.
pub const CATALOG: &[Achievement] = &[
    Achievement {
        code: "FIRST_CHECKIN",
        name: "First Steps",
        description: "Check in at your first location",
        icon: "👣",
        rule: UnlockRule::TotalCheckins(1),
    },
    Achievement {
        code: "CHECKINS_5",
        name: "Getting Around",
        description: "Check in at 5 locations",
        icon: "🗺️",
        rule: UnlockRule::TotalCheckins(5),
    },
    Achievement {
        code: "CHECKINS_10",
        name: "Pathfinder",
        description: "Check in at 10 locations",
        icon: "🧭",
        rule: UnlockRule::TotalCheckins(10),
    },
    Achievement {
        code: "STREAK_3",
        name: "Warming Up",
        description: "Check in 3 days in a row",
        icon: "🔥",
        rule: UnlockRule::StreakDays(3),
    },
    Achievement {
        code: "STREAK_7",
        name: "On Fire",
        description: "Check in 7 days in a row",
        icon: "🌋",
        rule: UnlockRule::StreakDays(7),
    },
];

/// Look up an achievement definition by its stable code.
pub fn by_code(code: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes_unique() {
        let mut seen = std::collections::HashSet::new();
        for achievement in CATALOG {
            assert!(
                seen.insert(achievement.code),
                "Duplicate achievement code: {}",
                achievement.code
            );
        }
    }

    #[test]
    fn test_by_code_lookup() {
        assert_eq!(by_code("FIRST_CHECKIN").unwrap().name, "First Steps");
        assert!(by_code("NO_SUCH_CODE").is_none());
    }
}
