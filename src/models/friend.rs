// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friend-request and relation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a friend request.
///
/// Resolved rows are kept for audit, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    /// Declined by the target
    Rejected,
    /// Taken back by the requester
    Withdrawn,
}

/// A directed friend request. At most one *pending* row may exist for an
/// ordered (requester, target) pair at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: u64,
    pub requester_id: u64,
    pub target_id: u64,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Relation between two users, from the viewer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    None,
    /// Viewer sent a request that is still pending
    PendingOutgoing,
    /// Viewer received a request that is still pending
    PendingIncoming,
    Friends,
    #[serde(rename = "self")]
    Myself,
}

/// Relation plus the pending request id, so a caller can accept or
/// reject without a second lookup.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelationInfo {
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

impl RelationInfo {
    pub fn none() -> Self {
        Self {
            relation: Relation::None,
            request_id: None,
        }
    }
}
