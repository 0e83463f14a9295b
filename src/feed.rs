//! Feed resolution.
//!
//! All four feed kinds reduce to the same shape: gather a candidate post
//! sequence, deduplicate, order newest first, slice a page. The shared
//! [`order_candidates`] primitive guarantees every feed uses the same
//! total order, regardless of how the candidates were gathered.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::cache::tags;
use crate::error::AppError;
use crate::models::{Group, Post, User};
use crate::pagination::Page;
use crate::repositories::{follow_repository, group_repository, post_repository, user_repository};

#[derive(Debug, Clone)]
pub enum FeedKind {
    /// Every post on the site.
    Global,
    /// Posts filed under the group with this slug.
    Group(String),
    /// Posts authored by the user with this username.
    Author(String),
    /// Posts from every author the viewer follows.
    Following(Uuid),
}

/// Extra context returned with an author feed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthorExtras {
    pub author: User,
    pub post_count: i64,
    /// Whether the requesting viewer follows this author. Always false
    /// for anonymous viewers and for authors viewing themselves.
    pub following: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedResponse {
    pub posts: Page<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorExtras>,
}

/// A resolved feed page plus the cache tags a cached copy must carry.
#[derive(Debug, Clone)]
pub struct ResolvedFeed {
    pub response: FeedResponse,
    pub cache_tags: Vec<String>,
}

/// Deduplicates by post id and imposes the feed total order: creation
/// timestamp descending, ties broken by id descending. Candidate lists
/// may overlap when a gathering strategy touches an author more than
/// once; the first occurrence wins.
pub fn order_candidates(mut posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts.retain(|post| seen.insert(post.id));
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    posts
}

pub async fn resolve(
    pool: &PgPool,
    kind: &FeedKind,
    viewer: Option<Uuid>,
    page: i64,
    page_size: usize,
) -> Result<ResolvedFeed, AppError> {
    let (candidates, group, author, cache_tags) = match kind {
        FeedKind::Global => {
            let candidates = post_repository::list_posts_all(pool).await?;
            (candidates, None, None, vec![tags::global()])
        }
        FeedKind::Group(slug) => {
            let group = group_repository::get_group_by_slug(pool, slug)
                .await?
                .ok_or(AppError::NotFound("Group"))?;
            let candidates = post_repository::list_posts_by_group(pool, group.id).await?;
            let cache_tags = vec![tags::group(group.id)];
            (candidates, Some(group), None, cache_tags)
        }
        FeedKind::Author(username) => {
            let author = user_repository::get_user_by_username(pool, username)
                .await?
                .ok_or(AppError::NotFound("User"))?;
            let candidates = post_repository::list_posts_by_author(pool, author.id).await?;
            let following = match viewer {
                Some(viewer_id) if viewer_id != author.id => {
                    follow_repository::is_following(pool, viewer_id, author.id).await?
                }
                _ => false,
            };
            let cache_tags = vec![tags::author(author.id)];
            let extras = AuthorExtras {
                post_count: candidates.len() as i64,
                author,
                following,
            };
            (candidates, None, Some(extras), cache_tags)
        }
        FeedKind::Following(viewer_id) => {
            let authors = follow_repository::list_followed_authors(pool, *viewer_id).await?;
            let candidates = if authors.is_empty() {
                Vec::new()
            } else {
                post_repository::list_posts_by_authors(pool, &authors).await?
            };
            let mut cache_tags = vec![tags::following(*viewer_id)];
            cache_tags.extend(authors.iter().map(|a| tags::author_posts(*a)));
            (candidates, None, None, cache_tags)
        }
    };

    let ordered = order_candidates(candidates);
    let posts = Page::slice(ordered, page_size, page);

    Ok(ResolvedFeed {
        response: FeedResponse {
            posts,
            group,
            author,
        },
        cache_tags,
    })
}
