use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repositories;

use cache::PageCache;
use handlers::{
    comment_handlers::{create_comment_handler, list_comments_handler},
    feed_handlers::{
        following_feed_handler, global_feed_handler, group_feed_handler, profile_feed_handler,
    },
    follow_handlers::{follow_handler, unfollow_handler},
    group_handlers::{create_group_handler, list_groups_handler},
    health_handler,
    post_handlers::{create_post_handler, get_post_handler, update_post_handler},
    user_handlers::{sync_user_handler, update_profile_handler},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub page_cache: PageCache,
    pub page_size: usize,
}

/// Builds the application router. `feed_cache_ttl` of zero disables the
/// feed page cache (tests rely on this).
pub fn create_router(db_pool: PgPool, page_size: usize, feed_cache_ttl: Duration) -> Router {
    let app_state = AppState {
        db_pool,
        page_cache: PageCache::new(feed_cache_ttl),
        page_size,
    };

    Router::new()
        .route("/", get(global_feed_handler))
        .route("/healthz", get(health_handler))
        .route("/feed", get(following_feed_handler))
        .route(
            "/groups",
            get(list_groups_handler).post(create_group_handler),
        )
        .route("/groups/:slug", get(group_feed_handler))
        .route("/profiles/:username", get(profile_feed_handler))
        .route(
            "/profiles/:username/follow",
            put(follow_handler).delete(unfollow_handler),
        )
        .route("/posts", post(create_post_handler))
        .route(
            "/posts/:post_id",
            get(get_post_handler).put(update_post_handler),
        )
        .route(
            "/posts/:post_id/comments",
            post(create_comment_handler).get(list_comments_handler),
        )
        .route("/users", post(sync_user_handler))
        .route("/users/:username", put(update_profile_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
