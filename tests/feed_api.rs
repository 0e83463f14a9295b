mod common;

use axum::http::{self, StatusCode};
use sqlx::PgPool;

use common::helpers::{
    create_test_app, create_test_group, create_test_post, read_feed, register_user, send,
};

#[sqlx::test]
async fn global_feed_pages_through_nineteen_posts(pool: PgPool) {
    let app = create_test_app(pool).await;
    let author = register_user(&app, "leo").await;

    for i in 1..=19 {
        create_test_post(&app, author.id, &format!("post {i}"), None).await;
    }

    let page1 = read_feed(&app, "/?page=1", None).await;
    assert_eq!(page1.posts.items.len(), 10);
    assert_eq!(page1.posts.items[0].text, "post 19");
    assert_eq!(page1.posts.items[9].text, "post 10");
    assert_eq!(page1.posts.meta.total_pages, 2);
    assert_eq!(page1.posts.meta.total_items, 19);
    assert!(page1.posts.meta.has_next);
    assert!(!page1.posts.meta.has_prev);

    let page2 = read_feed(&app, "/?page=2", None).await;
    assert_eq!(page2.posts.items.len(), 9);
    assert_eq!(page2.posts.items[0].text, "post 9");
    assert_eq!(page2.posts.items[8].text, "post 1");
    assert!(!page2.posts.meta.has_next);
    assert!(page2.posts.meta.has_prev);
}

#[sqlx::test]
async fn out_of_range_pages_clamp(pool: PgPool) {
    let app = create_test_app(pool).await;
    let author = register_user(&app, "leo").await;

    for i in 1..=19 {
        create_test_post(&app, author.id, &format!("post {i}"), None).await;
    }

    // Past the end clamps to the last page.
    let beyond = read_feed(&app, "/?page=7", None).await;
    assert_eq!(beyond.posts.meta.number, 2);
    assert_eq!(beyond.posts.items.len(), 9);

    // Zero clamps to the first page.
    let zero = read_feed(&app, "/?page=0", None).await;
    assert_eq!(zero.posts.meta.number, 1);
    assert_eq!(zero.posts.items.len(), 10);
}

#[sqlx::test]
async fn missing_page_parameter_defaults_to_first_page(pool: PgPool) {
    let app = create_test_app(pool).await;
    let author = register_user(&app, "leo").await;
    create_test_post(&app, author.id, "only post", None).await;

    let feed = read_feed(&app, "/", None).await;
    assert_eq!(feed.posts.meta.number, 1);
    assert_eq!(feed.posts.items.len(), 1);
}

#[sqlx::test]
async fn group_feed_only_contains_that_groups_posts(pool: PgPool) {
    let app = create_test_app(pool).await;
    let author = register_user(&app, "leo").await;
    create_test_group(&app, author.id, "Cats", "cats").await;
    create_test_group(&app, author.id, "Dogs", "dogs").await;

    let cat_post = create_test_post(&app, author.id, "a cat post", Some("cats")).await;
    create_test_post(&app, author.id, "a dog post", Some("dogs")).await;
    create_test_post(&app, author.id, "no group at all", None).await;

    let feed = read_feed(&app, "/groups/cats", None).await;
    assert_eq!(feed.posts.items.len(), 1);
    assert_eq!(feed.posts.items[0].id, cat_post.id);
    let group = feed.group.unwrap();
    assert_eq!(group.title, "Cats");
}

#[sqlx::test]
async fn unknown_group_slug_is_not_found(pool: PgPool) {
    let app = create_test_app(pool).await;

    let (status, _) = send(&app, http::Method::GET, "/groups/no-such-group", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn unknown_profile_username_is_not_found(pool: PgPool) {
    let app = create_test_app(pool).await;

    let (status, _) = send(&app, http::Method::GET, "/profiles/nobody", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn profile_feed_reports_post_count(pool: PgPool) {
    let app = create_test_app(pool).await;
    let author = register_user(&app, "leo").await;
    let other = register_user(&app, "mia").await;

    create_test_post(&app, author.id, "post one", None).await;
    create_test_post(&app, author.id, "post two", None).await;
    create_test_post(&app, other.id, "someone else entirely", None).await;

    let profile = read_feed(&app, "/profiles/leo", None).await;
    let extras = profile.author.unwrap();
    assert_eq!(extras.author.username, "leo");
    assert_eq!(extras.post_count, 2);
    assert_eq!(profile.posts.items.len(), 2);
    assert!(profile.posts.items.iter().all(|p| p.author_id == author.id));
}

#[sqlx::test]
async fn following_feed_requires_authentication(pool: PgPool) {
    let app = create_test_app(pool).await;

    let (status, _) = send(&app, http::Method::GET, "/feed", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn following_feed_merges_followed_authors_newest_first(pool: PgPool) {
    let app = create_test_app(pool).await;
    let viewer = register_user(&app, "viewer").await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let carol = register_user(&app, "carol").await;

    let a1 = create_test_post(&app, alice.id, "alice first", None).await;
    let b1 = create_test_post(&app, bob.id, "bob first", None).await;
    create_test_post(&app, carol.id, "carol, unfollowed", None).await;
    let a2 = create_test_post(&app, alice.id, "alice second", None).await;

    for username in ["alice", "bob"] {
        let (status, _) = send(
            &app,
            http::Method::PUT,
            &format!("/profiles/{username}/follow"),
            Some(viewer.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let feed = read_feed(&app, "/feed", Some(viewer.id)).await;
    assert_eq!(
        feed.posts.items.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![a2.id, b1.id, a1.id]
    );
}

#[sqlx::test]
async fn following_feed_has_no_duplicates(pool: PgPool) {
    let app = create_test_app(pool).await;
    let viewer = register_user(&app, "viewer").await;
    let alice = register_user(&app, "alice").await;
    let post = create_test_post(&app, alice.id, "the only post", None).await;

    let (status, _) = send(
        &app,
        http::Method::PUT,
        "/profiles/alice/follow",
        Some(viewer.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let feed = read_feed(&app, "/feed", Some(viewer.id)).await;
    let matches: Vec<_> = feed
        .posts
        .items
        .iter()
        .filter(|p| p.id == post.id)
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(feed.posts.items.len(), 1);
}

#[sqlx::test]
async fn unfollowing_removes_the_authors_posts_from_the_feed(pool: PgPool) {
    let app = create_test_app(pool).await;
    let viewer = register_user(&app, "viewer").await;
    let alice = register_user(&app, "alice").await;
    create_test_post(&app, alice.id, "you will miss this", None).await;

    let (status, _) = send(
        &app,
        http::Method::PUT,
        "/profiles/alice/follow",
        Some(viewer.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let feed = read_feed(&app, "/feed", Some(viewer.id)).await;
    assert_eq!(feed.posts.items.len(), 1);

    let (status, _) = send(
        &app,
        http::Method::DELETE,
        "/profiles/alice/follow",
        Some(viewer.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let feed = read_feed(&app, "/feed", Some(viewer.id)).await;
    assert!(feed.posts.items.is_empty());
}

#[sqlx::test]
async fn empty_follow_set_resolves_to_an_empty_feed(pool: PgPool) {
    let app = create_test_app(pool).await;
    let viewer = register_user(&app, "viewer").await;
    let alice = register_user(&app, "alice").await;
    create_test_post(&app, alice.id, "not followed", None).await;

    let feed = read_feed(&app, "/feed", Some(viewer.id)).await;
    assert!(feed.posts.items.is_empty());
    assert_eq!(feed.posts.meta.total_items, 0);
}
