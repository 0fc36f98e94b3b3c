// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity feed: the caller's own check-ins plus those of friends
//! who share their feed.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::FeedItem;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

const FEED_LIMIT: usize = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/feed", get(get_feed))
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
}

async fn get_feed(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<FeedResponse>> {
    let mut authors = vec![auth.user_id];
    for friend in state.friends.friends_of(auth.user_id) {
        if friend.feed_public {
            authors.push(friend.id);
        }
    }

    let mut items: Vec<FeedItem> = Vec::new();
    for author_id in authors {
        let Some(author) = state.db.get_user(author_id) else {
            continue;
        };
        for checkin in state.db.checkins_for_user(author_id) {
            let Some(location) = state.registry.get_location(checkin.location_id) else {
                continue;
            };
            items.push(FeedItem {
                id: checkin.id,
                user_id: author.id,
                username: author.username.clone(),
                location_id: location.id,
                location_name: location.name.clone(),
                created_at: checkin.created_at,
                note: checkin.note,
                image_url: checkin.image_url,
            });
        }
    }

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    items.truncate(FEED_LIMIT);

    Ok(Json(FeedResponse { items }))
}
