use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Payload pushed by the identity provider when an account is created or
/// its profile changes upstream.
#[derive(serde::Deserialize)]
pub struct UpsertUserData {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub async fn upsert_user(pool: &PgPool, data: &UpsertUserData) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, first_name, last_name)
        VALUES ($1, $2, $3)
        ON CONFLICT (username)
        DO UPDATE SET first_name = EXCLUDED.first_name,
                      last_name = EXCLUDED.last_name
        RETURNING id, username, first_name, last_name, created_at
        "#,
    )
    .bind(&data.username)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .fetch_one(pool)
    .await
}

pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, first_name, last_name, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, first_name, last_name, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_display_name(
    pool: &PgPool,
    user_id: Uuid,
    first_name: &str,
    last_name: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = $1, last_name = $2
        WHERE id = $3
        RETURNING id, username, first_name, last_name, created_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
