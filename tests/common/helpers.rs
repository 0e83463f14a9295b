//! Shared helper functions for integration tests

use std::time::Duration;

use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use blog_server::{
    create_router,
    feed::FeedResponse,
    models::{Group, Post, User},
};

pub const VIEWER_HEADER: &str = "x-viewer-id";
pub const TEST_PAGE_SIZE: usize = 10;

/// Cache disabled so reads always observe the latest writes.
pub async fn create_test_app(pool: PgPool) -> Router {
    create_router(pool, TEST_PAGE_SIZE, Duration::ZERO)
}

pub async fn create_test_app_with_cache(pool: PgPool, ttl: Duration) -> Router {
    create_router(pool, TEST_PAGE_SIZE, ttl)
}

/// Sends a request with an optional JSON body and viewer header, returns
/// status and raw body.
pub async fn send(
    app: &Router,
    method: http::Method,
    uri: &str,
    viewer: Option<Uuid>,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(viewer) = viewer {
        builder = builder.header(VIEWER_HEADER, viewer.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn register_user(app: &Router, username: &str) -> User {
    let (status, body) = send(
        app,
        http::Method::POST,
        "/users",
        None,
        Some(json!({
            "username": username,
            "first_name": "Test",
            "last_name": username.to_uppercase(),
        })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::OK,
        "failed to register user: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("failed to deserialize user in helper")
}

pub async fn create_test_group(app: &Router, creator: Uuid, title: &str, slug: &str) -> Group {
    let (status, body) = send(
        app,
        http::Method::POST,
        "/groups",
        Some(creator),
        Some(json!({ "title": title, "slug": slug, "description": "..." })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "failed to create group: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("failed to deserialize group in helper")
}

pub async fn create_test_post(
    app: &Router,
    author: Uuid,
    text: &str,
    group_slug: Option<&str>,
) -> Post {
    let (status, body) = send(
        app,
        http::Method::POST,
        "/posts",
        Some(author),
        Some(json!({ "text": text, "group_slug": group_slug })),
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "failed to create post: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("failed to deserialize post in helper")
}

pub async fn read_feed(app: &Router, uri: &str, viewer: Option<Uuid>) -> FeedResponse {
    let (status, body) = send(app, http::Method::GET, uri, viewer, None).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "failed to read feed {}: {}",
        uri,
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("failed to deserialize feed in helper")
}
