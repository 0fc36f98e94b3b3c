// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory persistence with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile + progression counters)
//! - Check-in records (one per user/location pair)
//! - Friend requests and materialized friendships
//! - Per-user mission progress
//!
//! Also owns the serialization scopes: a per-user lock guarding counter
//! read-modify-write sequences and a per-pair lock guarding friend
//! request transitions.

use crate::models::{CheckinRecord, FriendRequest, MissionProgress, RequestStatus, Trip, User};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application store. Cheap to clone; all clones see the same data.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: DashMap<u64, User>,
    /// Check-in records by id
    checkins: DashMap<u64, CheckinRecord>,
    /// (user_id, location_id) -> check-in id, for idempotency lookups
    visited: DashMap<(u64, u64), u64>,
    friend_requests: DashMap<u64, FriendRequest>,
    /// Unordered friend pairs, stored with the smaller id first
    friendships: DashMap<(u64, u64), ()>,
    /// (user_id, mission_id) -> progress
    mission_progress: DashMap<(u64, u64), MissionProgress>,
    trips: DashMap<u64, Trip>,

    checkin_seq: AtomicU64,
    request_seq: AtomicU64,
    trip_seq: AtomicU64,

    user_locks: DashMap<u64, Arc<Mutex<()>>>,
    pair_locks: DashMap<(u64, u64), Arc<Mutex<()>>>,
}

fn ordered_pair(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Serialization Scopes ────────────────────────────────────

    /// Lock guarding one user's counter read-modify-write sequence.
    /// Different users' check-ins proceed in parallel.
    pub fn user_lock(&self, user_id: u64) -> Arc<Mutex<()>> {
        self.inner
            .user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Lock guarding friend-request transitions for an unordered pair.
    pub fn pair_lock(&self, a: u64, b: u64) -> Arc<Mutex<()>> {
        self.inner
            .pair_locks
            .entry(ordered_pair(a, b))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self, user_id: u64) -> Option<User> {
        self.inner.users.get(&user_id).map(|u| u.clone())
    }

    /// Create or update a user.
    pub fn upsert_user(&self, user: &User) {
        self.inner.users.insert(user.id, user.clone());
    }

    /// Case-insensitive username substring search, excluding one user.
    pub fn search_users(&self, query: &str, exclude_user_id: u64) -> Vec<User> {
        let needle = query.to_lowercase();
        let mut matches: Vec<User> = self
            .inner
            .users
            .iter()
            .filter(|entry| entry.id != exclude_user_id)
            .filter(|entry| entry.username.to_lowercase().contains(&needle))
            .map(|entry| entry.clone())
            .collect();
        matches.sort_by(|a, b| a.username.cmp(&b.username));
        matches
    }

    // ─── Check-in Operations ─────────────────────────────────────

    pub fn next_checkin_id(&self) -> u64 {
        self.inner.checkin_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Store a check-in record and index it for idempotency lookups.
    pub fn insert_checkin(&self, record: &CheckinRecord) {
        self.inner
            .visited
            .insert((record.user_id, record.location_id), record.id);
        self.inner.checkins.insert(record.id, record.clone());
    }

    /// The existing check-in for (user, location), if any.
    pub fn checkin_for(&self, user_id: u64, location_id: u64) -> Option<CheckinRecord> {
        let id = *self.inner.visited.get(&(user_id, location_id))?;
        self.inner.checkins.get(&id).map(|c| c.clone())
    }

    /// All check-ins for a user, newest first.
    pub fn checkins_for_user(&self, user_id: u64) -> Vec<CheckinRecord> {
        let mut records: Vec<CheckinRecord> = self
            .inner
            .checkins
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }

    /// Locations the user has checked into.
    pub fn visited_location_ids(&self, user_id: u64) -> Vec<u64> {
        self.inner
            .visited
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.key().1)
            .collect()
    }

    // ─── Friend Operations ───────────────────────────────────────

    pub fn next_request_id(&self) -> u64 {
        self.inner.request_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn insert_friend_request(&self, request: &FriendRequest) {
        self.inner.friend_requests.insert(request.id, request.clone());
    }

    pub fn get_friend_request(&self, request_id: u64) -> Option<FriendRequest> {
        self.inner.friend_requests.get(&request_id).map(|r| r.clone())
    }

    /// Resolved rows are kept for audit; this overwrites in place.
    pub fn update_friend_request(&self, request: &FriendRequest) {
        self.inner.friend_requests.insert(request.id, request.clone());
    }

    /// The pending request between two users in either direction, if any.
    pub fn pending_request_between(&self, a: u64, b: u64) -> Option<FriendRequest> {
        self.inner
            .friend_requests
            .iter()
            .filter(|entry| entry.status == RequestStatus::Pending)
            .find(|entry| {
                (entry.requester_id == a && entry.target_id == b)
                    || (entry.requester_id == b && entry.target_id == a)
            })
            .map(|entry| entry.clone())
    }

    /// Materialize the symmetric friendship for an accepted request.
    pub fn insert_friendship(&self, a: u64, b: u64) {
        self.inner.friendships.insert(ordered_pair(a, b), ());
    }

    pub fn are_friends(&self, a: u64, b: u64) -> bool {
        self.inner.friendships.contains_key(&ordered_pair(a, b))
    }

    pub fn friends_of(&self, user_id: u64) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .inner
            .friendships
            .iter()
            .filter_map(|entry| {
                let (a, b) = *entry.key();
                if a == user_id {
                    Some(b)
                } else if b == user_id {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    // ─── Trip Operations ─────────────────────────────────────────

    pub fn next_trip_id(&self) -> u64 {
        self.inner.trip_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Create or overwrite a trip.
    pub fn upsert_trip(&self, trip: &Trip) {
        self.inner.trips.insert(trip.id, trip.clone());
    }

    pub fn get_trip(&self, trip_id: u64) -> Option<Trip> {
        self.inner.trips.get(&trip_id).map(|t| t.clone())
    }

    pub fn delete_trip(&self, trip_id: u64) {
        self.inner.trips.remove(&trip_id);
    }

    /// All of a user's trips, newest first.
    pub fn trips_for_user(&self, user_id: u64) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .inner
            .trips
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        trips
    }

    // ─── Mission Progress Operations ─────────────────────────────

    pub fn mission_progress(&self, user_id: u64, mission_id: u64) -> Option<MissionProgress> {
        self.inner
            .mission_progress
            .get(&(user_id, mission_id))
            .map(|p| p.clone())
    }

    pub fn set_mission_progress(&self, user_id: u64, progress: &MissionProgress) {
        self.inner
            .mission_progress
            .insert((user_id, progress.mission_id), progress.clone());
    }
}
