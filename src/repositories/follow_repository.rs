use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Follow;

/// Creates the edge if absent. ON CONFLICT makes the insert atomic with
/// the existence check, so concurrent identical requests cannot produce a
/// duplicate edge. The self-follow rejection lives in the handler; the
/// table CHECK is the backstop.
pub async fn follow(pool: &PgPool, follower_id: Uuid, author_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO follows (follower_id, author_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, author_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Removes the edge. Removing an absent edge is a no-op, not an error.
pub async fn unfollow(pool: &PgPool, follower_id: Uuid, author_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND author_id = $2")
        .bind(follower_id)
        .bind(author_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn is_following(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<_, Follow>(
        r#"
        SELECT follower_id, author_id, created_at
        FROM follows
        WHERE follower_id = $1 AND author_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn list_followed_authors(
    pool: &PgPool,
    follower_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM follows WHERE follower_id = $1")
        .bind(follower_id)
        .fetch_all(pool)
        .await
}
