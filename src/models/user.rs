//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User profile and progression counters.
///
/// Points and streak are mutated exclusively by the check-in engine; the
/// privacy flags are mutated only by the user themself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Cumulative points: one per distinct location checked into
    #[serde(default)]
    pub points: u32,
    /// Consecutive calendar days (UTC) with at least one check-in
    #[serde(default)]
    pub streak_days: u32,
    /// Timestamp of the last successful check-in
    #[serde(default)]
    pub last_checkin_at: Option<DateTime<Utc>>,
    /// Unlocked achievement codes with unlock timestamps
    #[serde(default)]
    pub achievements: HashMap<String, DateTime<Utc>>,
    /// Profile visible to non-friends
    #[serde(default = "default_true")]
    pub profile_public: bool,
    /// Check-ins visible to friends in the feed
    #[serde(default = "default_true")]
    pub feed_public: bool,
    /// When the user first registered
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Create a fresh user with zeroed progression counters.
    pub fn new(id: u64, username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            points: 0,
            streak_days: 0,
            last_checkin_at: None,
            achievements: HashMap::new(),
            profile_public: true,
            feed_public: true,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_progress() {
        let user = User::new(1, "explorer", Utc::now());

        assert_eq!(user.points, 0);
        assert_eq!(user.streak_days, 0);
        assert!(user.last_checkin_at.is_none());
        assert!(user.achievements.is_empty());
        assert!(user.profile_public);
        assert!(user.feed_public);
    }
}
