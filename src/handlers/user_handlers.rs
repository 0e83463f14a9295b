use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    auth::AuthenticatedUser,
    cache::tags,
    error::AppError,
    models::User,
    repositories::user_repository::{self, UpsertUserData},
    AppState,
};

/// Identity-provider sync: creates the account on first sight, refreshes
/// the display name on subsequent calls.
pub async fn sync_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpsertUserData>,
) -> Result<Json<User>, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }

    let user = user_repository::upsert_user(&state.db_pool, &payload).await?;
    info!(username = %user.username, "synced user");
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct UpdateProfilePayload {
    pub first_name: String,
    pub last_name: String,
}

/// Display name is the only profile field mutable here, and only by the
/// account owner.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<User>, AppError> {
    let target = user_repository::get_user_by_username(&state.db_pool, &username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if target.id != user.0 {
        return Err(AppError::Forbidden);
    }

    let updated = user_repository::update_display_name(
        &state.db_pool,
        target.id,
        &payload.first_name,
        &payload.last_name,
    )
    .await?
    .ok_or(AppError::NotFound("User"))?;

    // Cached author feeds embed the display name in their extras.
    state.page_cache.purge_tags(&[tags::author(target.id)]);

    Ok(Json(updated))
}
