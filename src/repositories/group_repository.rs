use sqlx::PgPool;

use crate::models::Group;

#[derive(serde::Deserialize)]
pub struct CreateGroupData {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_group(pool: &PgPool, data: &CreateGroupData) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (title, slug, description)
        VALUES ($1, $2, $3)
        RETURNING id, title, slug, description, created_at
        "#,
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.description)
    .fetch_one(pool)
    .await
}

pub async fn get_group_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// All groups, for the group picker shown on the post form.
pub async fn list_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT id, title, slug, description, created_at
        FROM groups
        ORDER BY title ASC
        "#,
    )
    .fetch_all(pool)
    .await
}
