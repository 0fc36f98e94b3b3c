// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod achievement;
pub mod checkin;
pub mod friend;
pub mod location;
pub mod mission;
pub mod trip;
pub mod user;

pub use achievement::Achievement;
pub use checkin::{CheckinRecord, FeedItem};
pub use friend::{FriendRequest, Relation, RelationInfo, RequestStatus};
pub use location::{Location, LocationSummary};
pub use mission::{Mission, MissionGoal, MissionProgress, MissionSnapshot};
pub use trip::Trip;
pub use user::User;
