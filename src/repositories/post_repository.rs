use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

pub struct CreatePostData {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_ref: Option<String>,
}

pub struct UpdatePostData {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_ref: Option<String>,
}

pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    data: CreatePostData,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, text, group_id, image_ref)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, group_id, text, image_ref, created_at
        "#,
    )
    .bind(author_id)
    .bind(&data.text)
    .bind(data.group_id)
    .bind(&data.image_ref)
    .fetch_one(pool)
    .await
}

/// The author check happens in the handler; this only applies the update.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    data: UpdatePostData,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $1, group_id = $2, image_ref = $3
        WHERE id = $4
        RETURNING id, author_id, group_id, text, image_ref, created_at
        "#,
    )
    .bind(&data.text)
    .bind(data.group_id)
    .bind(&data.image_ref)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_ref, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

// Candidate queries for the feed resolver. All of them return newest
// first with ties broken by id so the database order already matches the
// resolver's total order.

pub async fn list_posts_all(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_ref, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_posts_by_group(pool: &PgPool, group_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_ref, created_at
        FROM posts
        WHERE group_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

pub async fn list_posts_by_author(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_ref, created_at
        FROM posts
        WHERE author_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Posts from every author in `author_ids`, in one query. Authors with no
/// posts simply contribute nothing.
pub async fn list_posts_by_authors(
    pool: &PgPool,
    author_ids: &[Uuid],
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_ref, created_at
        FROM posts
        WHERE author_id = ANY($1)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(author_ids)
    .fetch_all(pool)
    .await
}

pub async fn count_posts_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await
}
