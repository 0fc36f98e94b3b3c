// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waypoints API Server
//!
//! Validates location check-ins against a geofenced catalog and keeps
//! per-user points, streaks, achievements and mission progress.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypoints_api::{
    config::Config,
    db::Store,
    services::{CheckinEngine, FriendGraph, LocationRegistry},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Waypoints API");

    // Load the location and mission catalog
    tracing::info!(path = %config.catalog_path, "Loading catalog");
    let registry =
        LocationRegistry::load_from_file(&config.catalog_path).expect("Failed to load catalog");
    tracing::info!(
        locations = registry.locations().len(),
        missions = registry.missions().len(),
        "Catalog loaded"
    );

    // In-memory store with per-user and per-pair locks
    let db = Store::new();

    let engine = CheckinEngine::new(db.clone(), registry.clone());
    let friends = FriendGraph::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        registry,
        engine,
        friends,
    });

    // Build router
    let app = waypoints_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("waypoints_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
