use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::AuthenticatedUser,
    cache::tags,
    error::AppError,
    repositories::{follow_repository, user_repository},
    AppState,
};

/// Edge state after a follow or unfollow request.
#[derive(Serialize, Deserialize)]
pub struct FollowStatus {
    pub username: String,
    pub following: bool,
}

/// Idempotent: following an already-followed author changes nothing and
/// still succeeds.
pub async fn follow_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthenticatedUser,
) -> Result<Json<FollowStatus>, AppError> {
    let author = user_repository::get_user_by_username(&state.db_pool, &username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if author.id == user.0 {
        return Err(AppError::SelfFollow);
    }
    user_repository::get_user_by_id(&state.db_pool, user.0)
        .await?
        .ok_or(AppError::Unauthorized)?;

    follow_repository::follow(&state.db_pool, user.0, author.id).await?;
    state
        .page_cache
        .purge_tags(&[tags::following(user.0), tags::author(author.id)]);

    info!(follower = %user.0, author = %author.username, "follow edge ensured");
    Ok(Json(FollowStatus {
        username: author.username,
        following: true,
    }))
}

/// Idempotent: unfollowing an author who was never followed is a no-op.
pub async fn unfollow_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthenticatedUser,
) -> Result<Json<FollowStatus>, AppError> {
    let author = user_repository::get_user_by_username(&state.db_pool, &username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    follow_repository::unfollow(&state.db_pool, user.0, author.id).await?;
    state
        .page_cache
        .purge_tags(&[tags::following(user.0), tags::author(author.id)]);

    info!(follower = %user.0, author = %author.username, "follow edge removed");
    Ok(Json(FollowStatus {
        username: author.username,
        following: false,
    }))
}
