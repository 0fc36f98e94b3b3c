// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Waypoints: check-in and progression engine
//!
//! This crate provides the backend API for validating location
//! check-ins against a geofenced catalog and deriving points, levels,
//! streaks, achievements and mission progress from them.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use services::{CheckinEngine, FriendGraph, LocationRegistry};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
    pub registry: LocationRegistry,
    pub engine: CheckinEngine,
    pub friends: FriendGraph,
}
