// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Progress and rank engine.
//!
//! Handles the core workflow for every trackable user action:
//! 1. Read the user and the same-day history for the activity kind
//! 2. Decide whether this is the first event of that kind today
//! 3. Award points, promoting the user when progress reaches the threshold
//! 4. Commit event, progress/rank update and notification as one unit of work
//!
//! The decision step ([`plan_activity`]) is a pure function; persistence
//! and locking live in [`ProgressEngine`].

use crate::db::{ActivitySnapshot, ActivityUnitOfWork, Db, ProgressUpdate};
use crate::error::Result;
use crate::id_utils::new_document_id;
use crate::models::{ActivityEvent, Notification, User};
use crate::time_utils::{day_key, format_utc_rfc3339};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Points earned by the first event of a kind on a given day.
pub const POINTS_PER_ACTIVITY: u32 = 5;

/// Progress needed for a promotion.
pub const RANK_UP_THRESHOLD: u32 = 100;

/// Per-user locks serializing activity recording.
pub type UserLocks = Arc<DashMap<u64, Arc<Mutex<()>>>>;

/// Result of recording one activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityOutcome {
    pub event_id: String,
    pub kind: String,
    pub points_awarded: u32,
    /// Progress after the event, None if the user does not exist
    pub progress: Option<u32>,
    /// Rank after the event, None if the user does not exist
    pub rank: Option<u32>,
    pub ranked_up: bool,
    pub notification_id: Option<String>,
}

/// Add `points` to a user, promoting at most once.
///
/// Returns `true` if the user was promoted. Progress resets to 0 on
/// promotion regardless of how far the threshold was overshot.
pub fn apply_points(user: &mut User, points: u32) -> bool {
    user.progress = user.progress.saturating_add(points);
    if user.progress >= RANK_UP_THRESHOLD {
        user.rank = user.rank.saturating_add(1);
        user.progress = 0;
        true
    } else {
        false
    }
}

/// Whether an event earns points, given how many same-day events of its kind
/// were already stored before it.
///
/// Only earlier rows count: the event being recorded never disqualifies itself.
pub fn is_first_of_day(prior_same_day: usize) -> bool {
    prior_same_day == 0
}

/// Decide every write caused by `event`, given the state read beforehand.
///
/// `event.points_awarded` is filled in here. A missing user still yields the
/// event row, with no user update and no notification.
pub fn plan_activity(
    snapshot: ActivitySnapshot,
    mut event: ActivityEvent,
    notification_id: String,
) -> ActivityUnitOfWork {
    let Some(mut user) = snapshot.user else {
        event.points_awarded = 0;
        return ActivityUnitOfWork {
            event,
            progress: None,
            notification: None,
        };
    };

    if !is_first_of_day(snapshot.prior_same_day) {
        event.points_awarded = 0;
        return ActivityUnitOfWork {
            event,
            progress: None,
            notification: None,
        };
    }

    event.points_awarded = POINTS_PER_ACTIVITY;
    let ranked_up = apply_points(&mut user, POINTS_PER_ACTIVITY);

    let notification = ranked_up.then(|| {
        Notification::rank_up(
            notification_id,
            user.id,
            &user.name,
            user.rank,
            &event.recorded_at,
        )
    });

    ActivityUnitOfWork {
        event,
        progress: Some(ProgressUpdate {
            user_id: user.id,
            progress: user.progress,
            rank: user.rank,
        }),
        notification,
    }
}

/// Records activities and applies their progress effects.
#[derive(Clone)]
pub struct ProgressEngine {
    db: Db,
    /// `None` leaves concurrent same-day events free to race.
    locks: Option<UserLocks>,
}

impl ProgressEngine {
    /// Create an engine. With `serialize_per_user`, read-decide-commit runs
    /// under a per-user lock.
    pub fn new(db: Db, serialize_per_user: bool) -> Self {
        Self {
            db,
            locks: serialize_per_user.then(|| Arc::new(DashMap::new())),
        }
    }

    /// Whether recording is serialized per user.
    pub fn serializes_per_user(&self) -> bool {
        self.locks.is_some()
    }

    /// Number of users with a live lock entry.
    pub fn tracked_users(&self) -> usize {
        self.locks.as_ref().map_or(0, |locks| locks.len())
    }

    fn user_lock(&self, user_id: u64) -> Option<Arc<Mutex<()>>> {
        self.locks.as_ref().map(|locks| {
            locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        })
    }

    /// Delete a user and everything they own, then drop their lock entry.
    ///
    /// Runs under the user's lock so no recording is mid-flight when the rows go.
    pub async fn delete_user(&self, user_id: u64) -> Result<usize> {
        let lock = self.user_lock(user_id);
        let guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let deleted = self.db.delete_user_data(user_id).await?;

        drop(guard);
        if let Some(locks) = &self.locks {
            locks.remove(&user_id);
        }
        Ok(deleted)
    }

    /// Record an activity happening now.
    pub async fn record_activity(&self, user_id: u64, kind: &str) -> Result<ActivityOutcome> {
        self.record_activity_at(user_id, kind, Utc::now()).await
    }

    /// Record an activity at an explicit time (the calendar day is taken in UTC).
    pub async fn record_activity_at(
        &self,
        user_id: u64,
        kind: &str,
        now: DateTime<Utc>,
    ) -> Result<ActivityOutcome> {
        let lock = self.user_lock(user_id);
        let _guard = match &lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let day = day_key(now);
        let snapshot = self.db.load_activity_snapshot(user_id, kind, &day).await?;

        if snapshot.user.is_none() {
            tracing::warn!(user_id, kind, "User not found, recording activity without points");
        }

        let event = ActivityEvent {
            id: new_document_id()?,
            user_id,
            kind: kind.to_string(),
            day,
            recorded_at: format_utc_rfc3339(now),
            count: 1,
            points_awarded: 0,
        };

        let work = plan_activity(snapshot, event, new_document_id()?);
        let work = self.db.commit_activity(work).await?;

        let outcome = ActivityOutcome {
            event_id: work.event.id.clone(),
            kind: work.event.kind.clone(),
            points_awarded: work.event.points_awarded,
            progress: work.progress.map(|p| p.progress),
            rank: work.progress.map(|p| p.rank),
            ranked_up: work.notification.is_some(),
            notification_id: work.notification.as_ref().map(|n| n.id.clone()),
        };

        if outcome.ranked_up {
            tracing::info!(user_id, kind, rank = ?outcome.rank, "User ranked up");
        } else if outcome.points_awarded > 0 {
            tracing::debug!(user_id, kind, progress = ?outcome.progress, "Points awarded");
        } else {
            tracing::debug!(user_id, kind, "Repeat activity today, no points");
        }

        // Unawarded events leave the user untouched; report current state.
        if outcome.progress.is_none() {
            if let Some(user) = self.db.get_user(user_id).await? {
                return Ok(ActivityOutcome {
                    progress: Some(user.progress),
                    rank: Some(user.rank),
                    ..outcome
                });
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(progress: u32, rank: u32) -> User {
        User {
            id: 42,
            email: None,
            name: "Terra".to_string(),
            avatar: None,
            progress,
            rank,
            guest: false,
            created_at: "2025-01-01T00:00:00.000000Z".to_string(),
        }
    }

    fn event(kind: &str) -> ActivityEvent {
        ActivityEvent {
            id: "evt".to_string(),
            user_id: 42,
            kind: kind.to_string(),
            day: "2025-06-01".to_string(),
            recorded_at: "2025-06-01T08:00:00.000000Z".to_string(),
            count: 1,
            points_awarded: 0,
        }
    }

    #[test]
    fn test_apply_points_below_threshold() {
        let mut u = user(90, 3);
        assert!(!apply_points(&mut u, 5));
        assert_eq!((u.progress, u.rank), (95, 3));
    }

    #[test]
    fn test_apply_points_exact_threshold_promotes() {
        let mut u = user(95, 3);
        assert!(apply_points(&mut u, 5));
        assert_eq!((u.progress, u.rank), (0, 4));
    }

    #[test]
    fn test_apply_points_overshoot_promotes_once() {
        let mut u = user(99, 7);
        assert!(apply_points(&mut u, 5));
        assert_eq!((u.progress, u.rank), (0, 8));
    }

    #[test]
    fn test_apply_points_large_overshoot_still_single_promotion() {
        let mut u = user(10, 1);
        assert!(apply_points(&mut u, 250));
        assert_eq!((u.progress, u.rank), (0, 2));
    }

    #[test]
    fn test_first_of_day_ignores_the_event_itself() {
        assert!(is_first_of_day(0));
        assert!(!is_first_of_day(1));
    }

    #[test]
    fn test_plan_first_event_awards_points() {
        let snapshot = ActivitySnapshot {
            user: Some(user(90, 3)),
            prior_same_day: 0,
        };
        let work = plan_activity(snapshot, event("carbon_check"), "n1".to_string());

        assert_eq!(work.event.points_awarded, POINTS_PER_ACTIVITY);
        let updated = work.progress.expect("progress should be updated");
        assert_eq!(
            updated,
            ProgressUpdate {
                user_id: 42,
                progress: 95,
                rank: 3
            }
        );
        assert!(work.notification.is_none());
    }

    #[test]
    fn test_plan_repeat_event_keeps_history_only() {
        let snapshot = ActivitySnapshot {
            user: Some(user(90, 3)),
            prior_same_day: 1,
        };
        let work = plan_activity(snapshot, event("carbon_check"), "n1".to_string());

        assert_eq!(work.event.points_awarded, 0);
        assert!(work.progress.is_none());
        assert!(work.notification.is_none());
    }

    #[test]
    fn test_plan_missing_user_keeps_history_only() {
        let snapshot = ActivitySnapshot {
            user: None,
            prior_same_day: 0,
        };
        let work = plan_activity(snapshot, event("post"), "n1".to_string());

        assert_eq!(work.event.kind, "post");
        assert_eq!(work.event.points_awarded, 0);
        assert!(work.progress.is_none());
        assert!(work.notification.is_none());
    }

    #[test]
    fn test_plan_rank_up_creates_notification() {
        let snapshot = ActivitySnapshot {
            user: Some(user(95, 3)),
            prior_same_day: 0,
        };
        let work = plan_activity(snapshot, event("vitamin_check"), "n1".to_string());

        let notification = work.notification.expect("rank-up should notify");
        assert_eq!(notification.id, "n1");
        assert_eq!(notification.user_id, 42);
        assert!(notification.title.contains("rank 4"));
        assert!(!notification.is_read);
        assert_eq!(notification.created_at, work.event.recorded_at);
    }
}
