// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mission progress tracking.

use crate::models::{Mission, MissionGoal, MissionProgress, MissionSnapshot};
use crate::services::achievements::ProgressCounters;
use chrono::{DateTime, Utc};

/// Advance one mission's progress from updated counters.
///
/// Progress is clamped at the target. Completion is one-way: a mission
/// stays completed even if the underlying counter (a broken streak)
/// later drops, and its recorded progress never regresses.
pub fn advance(
    mission: &Mission,
    counters: &ProgressCounters,
    mut progress: MissionProgress,
    now: DateTime<Utc>,
) -> MissionProgress {
    if progress.completed {
        return progress;
    }

    let counter = match mission.goal {
        MissionGoal::TotalCheckins => counters.total_checkins,
        MissionGoal::StreakDays => counters.streak_days,
    };

    progress.progress = progress.progress.max(counter.min(mission.target));
    if progress.progress >= mission.target {
        progress.completed = true;
        progress.completed_at = Some(now);
    }

    progress
}

/// Snapshot for API responses. `target` is validated > 0 at catalog load.
pub fn snapshot(mission: &Mission, progress: &MissionProgress) -> MissionSnapshot {
    MissionSnapshot {
        id: mission.id,
        name: mission.name.clone(),
        progress: progress.progress,
        target: mission.target,
        percent: 100 * progress.progress / mission.target,
        completed: progress.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission(goal: MissionGoal, target: u32) -> Mission {
        Mission {
            id: 7,
            name: "Test Mission".to_string(),
            goal,
            target,
        }
    }

    fn counters(total: u32, streak: u32) -> ProgressCounters {
        ProgressCounters {
            total_checkins: total,
            streak_days: streak,
        }
    }

    #[test]
    fn test_total_checkins_progress() {
        let m = mission(MissionGoal::TotalCheckins, 5);
        let p = advance(&m, &counters(3, 1), MissionProgress::new(7), Utc::now());

        assert_eq!(p.progress, 3);
        assert!(!p.completed);
        assert!(p.completed_at.is_none());
    }

    #[test]
    fn test_progress_clamped_at_target() {
        let m = mission(MissionGoal::TotalCheckins, 5);
        let p = advance(&m, &counters(12, 1), MissionProgress::new(7), Utc::now());

        assert_eq!(p.progress, 5);
        assert!(p.completed);
        assert!(p.completed_at.is_some());
    }

    #[test]
    fn test_streak_mission_completion_is_one_way() {
        let m = mission(MissionGoal::StreakDays, 3);
        let now = Utc::now();

        let completed = advance(&m, &counters(10, 3), MissionProgress::new(7), now);
        assert!(completed.completed);

        // Streak broke back to 1; the mission stays completed at full progress.
        let after_break = advance(&m, &counters(11, 1), completed.clone(), now);
        assert!(after_break.completed);
        assert_eq!(after_break.progress, 3);
        assert_eq!(after_break.completed_at, completed.completed_at);
    }

    #[test]
    fn test_incomplete_progress_never_regresses() {
        let m = mission(MissionGoal::StreakDays, 7);
        let now = Utc::now();

        let five = advance(&m, &counters(20, 5), MissionProgress::new(7), now);
        assert_eq!(five.progress, 5);

        let after_break = advance(&m, &counters(21, 1), five, now);
        assert_eq!(after_break.progress, 5);
        assert!(!after_break.completed);
    }

    #[test]
    fn test_percent_is_floored() {
        let m = mission(MissionGoal::TotalCheckins, 3);
        let p = advance(&m, &counters(1, 1), MissionProgress::new(7), Utc::now());

        let snap = snapshot(&m, &p);
        assert_eq!(snap.percent, 33);
        assert_eq!(snap.target, 3);
    }

    #[test]
    fn test_completed_snapshot_reads_100_percent() {
        let m = mission(MissionGoal::TotalCheckins, 5);
        let p = advance(&m, &counters(5, 1), MissionProgress::new(7), Utc::now());

        let snap = snapshot(&m, &p);
        assert_eq!(snap.percent, 100);
        assert!(snap.completed);
    }
}
