// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod achievements;
pub mod checkin;
pub mod friends;
pub mod geo;
pub mod missions;
pub mod progression;
pub mod registry;
pub mod streak;

pub use checkin::{CheckinAttempt, CheckinEngine, CheckinOutcome};
pub use friends::FriendGraph;
pub use registry::LocationRegistry;
