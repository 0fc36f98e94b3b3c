// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friend-request lifecycle and relation derivation.
//!
//! State machine per ordered pair: none -> pending -> friends, with
//! reject/withdraw returning to none (the request row is kept for
//! audit). Transitions for one unordered pair are serialized behind the
//! store's pair lock so two racing sends cannot both create a pending
//! row, and an accept cannot race a withdraw.

use crate::db::Store;
use crate::error::AppError;
use crate::models::{FriendRequest, Relation, RelationInfo, RequestStatus, User};
use chrono::Utc;

/// Friend graph over the shared store.
#[derive(Clone)]
pub struct FriendGraph {
    db: Store,
}

impl FriendGraph {
    pub fn new(db: Store) -> Self {
        Self { db }
    }

    /// Send a friend request from `requester` to `target`.
    pub async fn send_request(
        &self,
        requester_id: u64,
        target_id: u64,
    ) -> Result<FriendRequest, AppError> {
        if requester_id == target_id {
            return Err(AppError::Validation("SELF_REQUEST"));
        }
        if self.db.get_user(target_id).is_none() {
            return Err(AppError::NotFound(format!("User {} not found", target_id)));
        }

        let lock = self.db.pair_lock(requester_id, target_id);
        let _guard = lock.lock().await;

        if self.db.are_friends(requester_id, target_id) {
            return Err(AppError::Conflict("ALREADY_FRIENDS"));
        }
        if self
            .db
            .pending_request_between(requester_id, target_id)
            .is_some()
        {
            return Err(AppError::Conflict("DUPLICATE_REQUEST"));
        }

        let request = FriendRequest {
            id: self.db.next_request_id(),
            requester_id,
            target_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.db.insert_friend_request(&request);

        tracing::info!(
            request_id = request.id,
            requester_id,
            target_id,
            "Friend request sent"
        );
        Ok(request)
    }

    /// Accept a pending request. Only the target may accept.
    pub async fn accept(&self, request_id: u64, acting_user_id: u64) -> Result<(), AppError> {
        let request = self
            .db
            .get_friend_request(request_id)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        if request.target_id != acting_user_id {
            return Err(AppError::Forbidden("NOT_AUTHORIZED"));
        }

        let lock = self.db.pair_lock(request.requester_id, request.target_id);
        let _guard = lock.lock().await;

        // Re-read under the lock; the row may have been resolved by a
        // racing withdraw.
        let mut request = self
            .db
            .get_friend_request(request_id)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;
        if request.status != RequestStatus::Pending {
            return Err(AppError::NotFound(format!(
                "Request {} already resolved",
                request_id
            )));
        }

        request.status = RequestStatus::Accepted;
        request.resolved_at = Some(Utc::now());
        self.db.update_friend_request(&request);
        self.db
            .insert_friendship(request.requester_id, request.target_id);

        tracing::info!(
            request_id,
            requester_id = request.requester_id,
            target_id = request.target_id,
            "Friend request accepted"
        );
        Ok(())
    }

    /// Reject (target) or withdraw (requester) a pending request.
    pub async fn reject(&self, request_id: u64, acting_user_id: u64) -> Result<(), AppError> {
        let request = self
            .db
            .get_friend_request(request_id)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        if acting_user_id != request.target_id && acting_user_id != request.requester_id {
            return Err(AppError::Forbidden("NOT_AUTHORIZED"));
        }

        let lock = self.db.pair_lock(request.requester_id, request.target_id);
        let _guard = lock.lock().await;

        let mut request = self
            .db
            .get_friend_request(request_id)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;
        if request.status != RequestStatus::Pending {
            return Err(AppError::NotFound(format!(
                "Request {} already resolved",
                request_id
            )));
        }

        request.status = if acting_user_id == request.requester_id {
            RequestStatus::Withdrawn
        } else {
            RequestStatus::Rejected
        };
        request.resolved_at = Some(Utc::now());
        self.db.update_friend_request(&request);

        tracing::info!(request_id, status = ?request.status, "Friend request resolved");
        Ok(())
    }

    /// Current relation between two users, from the viewer's side.
    pub fn relation(&self, viewer_id: u64, subject_id: u64) -> RelationInfo {
        if viewer_id == subject_id {
            return RelationInfo {
                relation: Relation::Myself,
                request_id: None,
            };
        }
        if self.db.are_friends(viewer_id, subject_id) {
            return RelationInfo {
                relation: Relation::Friends,
                request_id: None,
            };
        }
        if let Some(request) = self.db.pending_request_between(viewer_id, subject_id) {
            let relation = if request.requester_id == viewer_id {
                Relation::PendingOutgoing
            } else {
                Relation::PendingIncoming
            };
            return RelationInfo {
                relation,
                request_id: Some(request.id),
            };
        }
        RelationInfo::none()
    }

    /// Accepted friends of a user, resolved to profiles.
    pub fn friends_of(&self, user_id: u64) -> Vec<User> {
        self.db
            .friends_of(user_id)
            .into_iter()
            .filter_map(|id| self.db.get_user(id))
            .collect()
    }

    /// Whether `viewer` may see `subject`'s check-ins.
    ///
    /// Visible iff viewer is the subject, or the subject's feed is public
    /// and they are friends.
    pub fn can_see_feed(&self, viewer_id: u64, subject: &User) -> bool {
        viewer_id == subject.id
            || (subject.feed_public && self.db.are_friends(viewer_id, subject.id))
    }
}
