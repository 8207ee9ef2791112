/// Feed assembly: join posts with author profiles from the identity provider
///
/// The join is strict. A feed entry with no attributable author is a
/// data-integrity problem worth surfacing loudly, so a missing author or a
/// profile without a username fails the whole call instead of degrading to
/// a partial list.
use crate::error::{AppError, Result};
use crate::identity::IdentityProvider;
use crate::models::{EnrichedPost, Post, PostAuthor};
use std::collections::HashSet;
use std::sync::Arc;

pub struct FeedAssembler {
    identity: Arc<dyn IdentityProvider>,
}

impl FeedAssembler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Resolve every post's author with a single batched provider call,
    /// preserving input order exactly.
    pub async fn enrich(&self, posts: Vec<Post>) -> Result<Vec<EnrichedPost>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let author_ids: Vec<String> = posts
            .iter()
            .filter(|post| seen.insert(post.author_id.clone()))
            .map(|post| post.author_id.clone())
            .collect();

        let profiles = self
            .identity
            .get_by_ids(&author_ids)
            .await
            .map_err(|e| AppError::Enrichment(e.to_string()))?;

        posts
            .into_iter()
            .map(|post| {
                let profile = profiles.get(&post.author_id).ok_or_else(|| {
                    AppError::Enrichment(format!("author for post {} not found", post.id))
                })?;

                let username = profile.username.clone().ok_or_else(|| {
                    AppError::Enrichment(format!(
                        "author {} has no username",
                        post.author_id
                    ))
                })?;

                Ok(EnrichedPost {
                    author: PostAuthor {
                        id: profile.id.clone(),
                        username,
                        profile_picture_url: profile.profile_picture_url.clone(),
                    },
                    post,
                })
            })
            .collect()
    }
}
