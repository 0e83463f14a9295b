use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::validate_text;
use crate::{
    auth::AuthenticatedUser,
    cache::tags,
    error::AppError,
    models::{Comment, Group, Post, User},
    repositories::{
        comment_repository, group_repository, post_repository,
        post_repository::{CreatePostData, UpdatePostData},
        user_repository,
    },
    AppState,
};

#[derive(Deserialize)]
pub struct CreatePostPayload {
    pub text: String,
    pub group_slug: Option<String>,
    pub image_ref: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePostPayload {
    pub text: String,
    pub group_slug: Option<String>,
    pub image_ref: Option<String>,
}

/// A post with everything the detail page needs: its comments (oldest
/// first), the author record and the author's total post count.
#[derive(Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub author: User,
    pub comments: Vec<Comment>,
    pub author_post_count: i64,
}

async fn resolve_group(
    state: &AppState,
    slug: Option<&String>,
) -> Result<Option<Group>, AppError> {
    match slug {
        Some(slug) => {
            let group = group_repository::get_group_by_slug(&state.db_pool, slug)
                .await?
                .ok_or(AppError::NotFound("Group"))?;
            Ok(Some(group))
        }
        None => Ok(None),
    }
}

/// The viewer id comes from the gateway; the account must have been
/// synced before the viewer can write anything.
async fn require_synced_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    user_repository::get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePostPayload>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let author = require_synced_user(&state, user.0).await?;
    let text = validate_text(&payload.text, "Post")?;
    let group = resolve_group(&state, payload.group_slug.as_ref()).await?;

    let post = post_repository::create_post(
        &state.db_pool,
        author.id,
        CreatePostData {
            text,
            group_id: group.as_ref().map(|g| g.id),
            image_ref: payload.image_ref,
        },
    )
    .await?;

    let mut purge = vec![
        tags::global(),
        tags::author(author.id),
        tags::author_posts(author.id),
    ];
    if let Some(group) = &group {
        purge.push(tags::group(group.id));
    }
    state.page_cache.purge_tags(&purge);

    info!(post_id = %post.id, author = %author.username, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostDetail>, AppError> {
    let post = post_repository::get_post_by_id(&state.db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;
    let author = user_repository::get_user_by_id(&state.db_pool, post.author_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    let comments = comment_repository::list_comments_by_post(&state.db_pool, post.id).await?;
    let author_post_count =
        post_repository::count_posts_by_author(&state.db_pool, post.author_id).await?;

    Ok(Json(PostDetail {
        post,
        author,
        comments,
        author_post_count,
    }))
}

/// Edits are restricted to the author; anyone else gets 403 and the post
/// is left untouched.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdatePostPayload>,
) -> Result<Json<Post>, AppError> {
    let existing = post_repository::get_post_by_id(&state.db_pool, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;

    if existing.author_id != user.0 {
        warn!(post_id = %post_id, viewer = %user.0, "edit attempt by non-author");
        return Err(AppError::Forbidden);
    }

    let text = validate_text(&payload.text, "Post")?;
    let group = resolve_group(&state, payload.group_slug.as_ref()).await?;

    let updated = post_repository::update_post(
        &state.db_pool,
        post_id,
        UpdatePostData {
            text,
            group_id: group.as_ref().map(|g| g.id),
            image_ref: payload.image_ref,
        },
    )
    .await?
    .ok_or(AppError::NotFound("Post"))?;

    let mut purge = vec![
        tags::global(),
        tags::author(existing.author_id),
        tags::author_posts(existing.author_id),
    ];
    if let Some(old_group) = existing.group_id {
        purge.push(tags::group(old_group));
    }
    if let Some(group) = &group {
        purge.push(tags::group(group.id));
    }
    state.page_cache.purge_tags(&purge);

    info!(post_id = %post_id, "updated post");
    Ok(Json(updated))
}
