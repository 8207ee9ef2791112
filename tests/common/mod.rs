//! In-memory collaborator fakes for integration tests
//!
//! No live Postgres, Redis, or identity provider is needed: the fakes
//! implement the same traits the service consumes and track call counts so
//! tests can assert batching behavior.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use emote_service::db::PostStore;
use emote_service::error::{AppError, Result};
use emote_service::identity::IdentityProvider;
use emote_service::models::{AuthorProfile, Post, RateLimitDecision};
use emote_service::services::RateLimiter;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Identity provider fake backed by a user map, counting batch calls so
/// tests can verify the assembler never degrades to one call per post.
pub struct FakeIdentityProvider {
    users: Mutex<HashMap<String, AuthorProfile>>,
    batch_call_count: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn new(users: Vec<AuthorProfile>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
            batch_call_count: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn batch_call_count(&self) -> usize {
        self.batch_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn get_by_ids(&self, ids: &[String]) -> Result<HashMap<String, AuthorProfile>> {
        self.batch_call_count.fetch_add(1, Ordering::SeqCst);

        let users = self.users.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).cloned().map(|u| (id.clone(), u)))
            .collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<AuthorProfile>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }
}

/// Post store fake over a Vec, with monotonic ids and injectable
/// timestamps for ordering scenarios.
pub struct FakePostStore {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    fail_writes: bool,
}

impl FakePostStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_writes: false,
        }
    }

    /// A store whose writes always fail, for persistence-error paths.
    pub fn failing() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_writes: true,
        }
    }

    /// Seed a post with an explicit timestamp (seconds since epoch).
    pub fn seed(&self, author_id: &str, content: &str, epoch_secs: i64) -> Post {
        self.insert(author_id, content, Utc.timestamp_opt(epoch_secs, 0).unwrap())
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn insert(&self, author_id: &str, content: &str, created_at: DateTime<Utc>) -> Post {
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at,
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    fn sorted_desc(posts: &[Post]) -> Vec<Post> {
        let mut sorted = posts.to_vec();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sorted
    }
}

#[async_trait]
impl PostStore for FakePostStore {
    async fn create(&self, author_id: &str, content: &str) -> Result<Post> {
        if self.fail_writes {
            return Err(AppError::Database("post store unavailable".to_string()));
        }
        Ok(self.insert(author_id, content, Utc::now()))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::sorted_desc(&posts)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::sorted_desc(&posts)
            .into_iter()
            .filter(|p| p.author_id == author_id)
            .collect())
    }
}

/// Rate limiter fake with a fixed quota and no window rollover: allows the
/// first `quota` calls, denies the rest.
pub struct QuotaRateLimiter {
    remaining: AtomicU32,
}

impl QuotaRateLimiter {
    pub fn new(quota: u32) -> Self {
        Self {
            remaining: AtomicU32::new(quota),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(u32::MAX)
    }
}

#[async_trait]
impl RateLimiter for QuotaRateLimiter {
    async fn check_and_consume(&self, _author_id: &str) -> RateLimitDecision {
        let previous = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(1))
            })
            .unwrap_or(0);

        if previous > 0 {
            RateLimitDecision::allow()
        } else {
            RateLimitDecision::deny()
        }
    }
}

/// Profile fixture helper.
pub fn profile(id: &str, username: Option<&str>) -> AuthorProfile {
    AuthorProfile {
        id: id.to_string(),
        username: username.map(String::from),
        profile_picture_url: format!("https://img.example/{}.png", id),
    }
}
