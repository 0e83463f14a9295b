use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::Group,
    repositories::group_repository::{self, CreateGroupData},
    AppState,
};

pub async fn list_groups_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Group>>, AppError> {
    let groups = group_repository::list_groups(&state.db_pool).await?;
    Ok(Json(groups))
}

/// Group creation is an administrative action; which identities count as
/// administrators is decided upstream, so any authenticated caller is
/// accepted here.
pub async fn create_group_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateGroupData>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Group title must not be empty".into()));
    }
    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("Group slug must not be empty".into()));
    }

    match group_repository::create_group(&state.db_pool, &payload).await {
        Ok(group) => {
            info!(slug = %group.slug, created_by = %user.0, "created group");
            Ok((StatusCode::CREATED, Json(group)))
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Validation(
            "A group with this slug already exists".into(),
        )),
        Err(e) => Err(e.into()),
    }
}
