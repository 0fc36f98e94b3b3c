// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily-activity streak tracking.
//!
//! A streak counts consecutive UTC calendar days with at least one
//! successful check-in. It advances at most once per calendar day no
//! matter how many locations are visited that day.

use chrono::{DateTime, Utc};

/// Invalid streak input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StreakError {
    #[error("check-in timestamp precedes the previous check-in")]
    NonMonotonicTime,
}

/// Advance the streak for a check-in happening at `now`.
///
/// - same UTC calendar date as the last check-in: unchanged
/// - exactly one day later: +1
/// - longer gap, or no previous check-in: restart at 1
/// - `now` before the last check-in: rejected
pub fn advance(
    last_checkin_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    current_streak: u32,
) -> Result<u32, StreakError> {
    let Some(last) = last_checkin_at else {
        return Ok(1);
    };

    if now < last {
        return Err(StreakError::NonMonotonicTime);
    }

    let day_gap = (now.date_naive() - last.date_naive()).num_days();
    match day_gap {
        // Already counted today; a second check-in still awards points
        // elsewhere but never advances the streak twice in one day.
        // A non-null last check-in implies at least one counted day.
        0 => Ok(current_streak.max(1)),
        1 => Ok(current_streak + 1),
        _ => Ok(1),
    }
}
