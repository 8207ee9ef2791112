/// Post service - the public operation surface
///
/// Composes the rate limiter, post store, feed assembler, and identity
/// lookup. Collaborators are injected at construction so the service is
/// testable without a live network.
use crate::error::{AppError, Result};
use crate::identity::IdentityProvider;
use crate::models::{AuthorProfile, EnrichedPost, Post};
use crate::services::enrichment::FeedAssembler;
use crate::services::rate_limit::RateLimiter;
use crate::db::PostStore;
use crate::validators::validate_post_content;
use std::sync::Arc;

/// Feed size cap.
pub const FEED_LIMIT: i64 = 100;

pub struct PostService {
    store: Arc<dyn PostStore>,
    limiter: Arc<dyn RateLimiter>,
    identity: Arc<dyn IdentityProvider>,
    assembler: FeedAssembler,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        limiter: Arc<dyn RateLimiter>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let assembler = FeedAssembler::new(identity.clone());
        Self {
            store,
            limiter,
            identity,
            assembler,
        }
    }

    /// Create a post. Validation and the rate-limit decision both happen
    /// before any persistence attempt; no insertion occurs on a rejection.
    pub async fn create_post(&self, author_id: &str, content: &str) -> Result<Post> {
        validate_post_content(content).map_err(AppError::Validation)?;

        let decision = self.limiter.check_and_consume(author_id).await;
        if !decision.allowed {
            tracing::info!(author_id, "post rejected by rate limit");
            return Err(AppError::RateLimited);
        }

        let post = self.store.create(author_id, content).await?;
        tracing::info!(author_id, post_id = post.id, "post created");

        Ok(post)
    }

    /// The public feed: the 100 most recent posts, enriched.
    pub async fn list_feed(&self) -> Result<Vec<EnrichedPost>> {
        let posts = self.store.list_recent(FEED_LIMIT).await?;
        self.assembler.enrich(posts).await
    }

    /// All posts by one author, enriched. Zero posts is an empty feed,
    /// not an error.
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<EnrichedPost>> {
        let posts = self.store.list_by_author(author_id).await?;
        self.assembler.enrich(posts).await
    }

    /// Resolve a profile by username for profile pages.
    pub async fn resolve_profile(&self, username: &str) -> Result<AuthorProfile> {
        self.identity
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::post_repo::MockPostStore;
    use crate::identity::MockIdentityProvider;
    use crate::models::RateLimitDecision;
    use crate::services::rate_limit::MockRateLimiter;

    #[tokio::test]
    async fn rate_limit_rejection_never_touches_the_store() {
        let mut store = MockPostStore::new();
        store.expect_create().times(0);

        let mut limiter = MockRateLimiter::new();
        limiter
            .expect_check_and_consume()
            .times(1)
            .returning(|_| RateLimitDecision::deny());

        let service = PostService::new(
            Arc::new(store),
            Arc::new(limiter),
            Arc::new(MockIdentityProvider::new()),
        );

        let result = service.create_post("u1", "😀").await;
        assert!(matches!(result, Err(AppError::RateLimited)));
    }

    #[tokio::test]
    async fn validation_rejection_never_consumes_quota() {
        let mut store = MockPostStore::new();
        store.expect_create().times(0);

        let mut limiter = MockRateLimiter::new();
        limiter.expect_check_and_consume().times(0);

        let service = PostService::new(
            Arc::new(store),
            Arc::new(limiter),
            Arc::new(MockIdentityProvider::new()),
        );

        let result = service.create_post("u1", "not emoji").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
