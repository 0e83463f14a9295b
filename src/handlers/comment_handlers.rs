use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::validate_text;
use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::Comment,
    repositories::{comment_repository, post_repository, user_repository},
    AppState,
};

#[derive(Deserialize)]
pub struct CreateCommentPayload {
    pub text: String,
}

pub async fn create_comment_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let author = user_repository::get_user_by_id(&state.db_pool, user.0)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let text = validate_text(&payload.text, "Comment")?;

    post_repository::get_post_by_id(&state.db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;

    let comment =
        comment_repository::create_comment(&state.db_pool, post_id, author.id, &text).await?;

    info!(comment_id = %comment.id, post_id = %post_id, "created comment");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    post_repository::get_post_by_id(&state.db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;

    let comments = comment_repository::list_comments_by_post(&state.db_pool, post_id).await?;
    Ok(Json(comments))
}
