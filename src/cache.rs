//! Whole-response feed cache.
//!
//! Feed GET responses are cached for a short, fixed window keyed by
//! (feed kind, scope, viewer, page). Every entry carries invalidation
//! tags; mutations purge the tags they affect. A stale read inside the
//! window after a write that bypassed the purge is an accepted tradeoff,
//! not a correctness bug.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

use crate::feed::FeedResponse;

#[derive(Debug, Clone)]
struct CacheEntry {
    response: FeedResponse,
    tags: Vec<String>,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct PageCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl PageCache {
    /// A zero TTL disables the cache entirely (used in tests).
    pub fn new(ttl: Duration) -> Self {
        let cache = Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        };
        if !ttl.is_zero() {
            let cache_clone = cache.clone();
            tokio::spawn(async move {
                cache_clone.purge_expired_periodically().await;
            });
        }
        cache
    }

    pub fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<FeedResponse> {
        if !self.enabled() {
            return None;
        }
        self.entries.get(key).and_then(|entry| {
            if entry.expires_at > Instant::now() {
                Some(entry.response.clone())
            } else {
                None
            }
        })
    }

    pub fn insert(&self, key: String, response: FeedResponse, tags: Vec<String>) {
        if !self.enabled() {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                response,
                tags,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every entry carrying at least one of `tags`.
    pub fn purge_tags(&self, tags: &[String]) {
        if !self.enabled() {
            return;
        }
        self.entries
            .retain(|_, entry| !entry.tags.iter().any(|t| tags.contains(t)));
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    async fn purge_expired_periodically(&self) {
        let mut interval = tokio::time::interval(self.ttl);
        loop {
            interval.tick().await;
            self.purge_expired();
        }
    }
}

/// Cache key for one rendered feed page. The viewer is part of the key
/// because author-feed extras differ per viewer.
pub fn feed_cache_key(kind: &str, scope: &str, viewer: &str, page: i64) -> String {
    format!("feed:{kind}:{scope}:{viewer}:{page}")
}

pub mod tags {
    use uuid::Uuid;

    pub fn global() -> String {
        "feed:global".to_string()
    }

    pub fn group(group_id: Uuid) -> String {
        format!("feed:group:{group_id}")
    }

    pub fn author(author_id: Uuid) -> String {
        format!("feed:author:{author_id}")
    }

    /// Carried by every following-feed entry, one per followed author, so
    /// a new post purges the feeds of the author's followers.
    pub fn author_posts(author_id: Uuid) -> String {
        format!("feed:author-posts:{author_id}")
    }

    pub fn following(viewer_id: Uuid) -> String {
        format!("feed:following:{viewer_id}")
    }
}
