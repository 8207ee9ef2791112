/// Data models for the emote service
///
/// - `Post`: locally persisted emoji post
/// - `AuthorProfile`: volatile projection of an identity-provider record
/// - `EnrichedPost`: post joined with its resolved author
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted post. Immutable after creation.
///
/// `id` is assigned by the store (BIGSERIAL) and is monotonic in insertion
/// order, so it doubles as the tie-breaker when two posts share a
/// `created_at` timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fixed-shape projection of an identity-provider user record.
///
/// `username` may be absent for provider accounts that never picked one;
/// enrichment treats that as a hard error, see `PostAuthor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: String,
    pub username: Option<String>,
    pub profile_picture_url: String,
}

/// Author data attached to a feed entry. Unlike `AuthorProfile`, the
/// username is guaranteed present; the feed assembler rejects profiles
/// without one instead of emitting a partially-populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: String,
    pub username: String,
    pub profile_picture_url: String,
}

/// A post joined with its resolved author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPost {
    pub post: Post,
    pub author: PostAuthor,
}

/// Outcome of a rate-limit check for one (author, window) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
}

impl RateLimitDecision {
    pub fn allow() -> Self {
        Self { allowed: true }
    }

    pub fn deny() -> Self {
        Self { allowed: false }
    }
}
