// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement evaluation against updated progression counters.

use crate::models::achievement::{UnlockRule, CATALOG};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Counters the evaluators consume after a check-in is applied.
#[derive(Debug, Clone, Copy)]
pub struct ProgressCounters {
    /// Total distinct locations checked into (equals the point total)
    pub total_checkins: u32,
    /// Current streak length in days
    pub streak_days: u32,
}

/// Return the codes newly unlocked by the given counters.
///
/// Idempotent: codes already present in `unlocked` are never re-emitted.
/// Predicates are re-checked on every event; counters only increase, so
/// no previously true predicate can become false.
pub fn evaluate(
    counters: &ProgressCounters,
    unlocked: &HashMap<String, DateTime<Utc>>,
) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|achievement| !unlocked.contains_key(achievement.code))
        .filter(|achievement| match achievement.rule {
            UnlockRule::TotalCheckins(n) => counters.total_checkins >= n,
            UnlockRule::StreakDays(n) => counters.streak_days >= n,
        })
        .map(|achievement| achievement.code)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(total: u32, streak: u32) -> ProgressCounters {
        ProgressCounters {
            total_checkins: total,
            streak_days: streak,
        }
    }

    #[test]
    fn test_first_checkin_unlocks_first_steps() {
        let newly = evaluate(&counters(1, 1), &HashMap::new());
        assert_eq!(newly, vec!["FIRST_CHECKIN"]);
    }

    #[test]
    fn test_thresholds_unlock_together() {
        // A user backfilled to 10 check-ins and a 7-day streak unlocks
        // everything at once.
        let newly = evaluate(&counters(10, 7), &HashMap::new());
        assert_eq!(
            newly,
            vec![
                "FIRST_CHECKIN",
                "CHECKINS_5",
                "CHECKINS_10",
                "STREAK_3",
                "STREAK_7"
            ]
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let c = counters(5, 3);
        let mut unlocked = HashMap::new();
        for code in evaluate(&c, &unlocked) {
            unlocked.insert(code.to_string(), Utc::now());
        }

        let second_pass = evaluate(&c, &unlocked);
        assert!(second_pass.is_empty(), "got {:?}", second_pass);
    }

    #[test]
    fn test_below_thresholds_unlock_nothing_new() {
        let mut unlocked = HashMap::new();
        unlocked.insert("FIRST_CHECKIN".to_string(), Utc::now());

        let newly = evaluate(&counters(4, 2), &unlocked);
        assert!(newly.is_empty());
    }
}
