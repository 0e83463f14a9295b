use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{AuthenticatedUser, Viewer},
    cache::feed_cache_key,
    error::AppError,
    feed::{self, FeedKind, FeedResponse},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

fn viewer_label(viewer: Option<Uuid>) -> String {
    viewer
        .map(|id| id.to_string())
        .unwrap_or_else(|| "anon".to_string())
}

/// Shared read path for all four feed kinds: consult the page cache,
/// resolve on a miss, store the result with its invalidation tags.
async fn serve_feed(
    state: &AppState,
    kind: FeedKind,
    viewer: Option<Uuid>,
    page: i64,
    cache_key: String,
) -> Result<Json<FeedResponse>, AppError> {
    if let Some(cached) = state.page_cache.get(&cache_key) {
        return Ok(Json(cached));
    }

    let resolved = feed::resolve(&state.db_pool, &kind, viewer, page, state.page_size).await?;
    state
        .page_cache
        .insert(cache_key, resolved.response.clone(), resolved.cache_tags);
    Ok(Json(resolved.response))
}

/// Every post on the site, newest first.
pub async fn global_feed_handler(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let key = feed_cache_key("global", "", &viewer_label(viewer.0), query.page);
    serve_feed(&state, FeedKind::Global, viewer.0, query.page, key).await
}

/// Posts filed under one group, plus the group metadata.
pub async fn group_feed_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    viewer: Viewer,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let key = feed_cache_key("group", &slug, &viewer_label(viewer.0), query.page);
    serve_feed(&state, FeedKind::Group(slug), viewer.0, query.page, key).await
}

/// One author's posts, plus their profile extras (post count and whether
/// the viewer already follows them).
pub async fn profile_feed_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    viewer: Viewer,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let key = feed_cache_key("author", &username, &viewer_label(viewer.0), query.page);
    serve_feed(&state, FeedKind::Author(username), viewer.0, query.page, key).await
}

/// The personalized feed: posts from every followed author, merged into
/// one newest-first sequence. Anonymous requests are rejected by the
/// extractor with 401.
pub async fn following_feed_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let key = feed_cache_key("following", "", &user.0.to_string(), query.page);
    serve_feed(
        &state,
        FeedKind::Following(user.0),
        Some(user.0),
        query.page,
        key,
    )
    .await
}
