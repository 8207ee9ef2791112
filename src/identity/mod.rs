/// Identity lookup boundary
///
/// Wraps the external identity provider. The provider is stateful and
/// quota-limited, so lookups are always batched: one `get_by_ids` call
/// per feed assembly, never one call per post.
pub mod client;

pub use client::HttpIdentityClient;

use crate::error::Result;
use crate::models::AuthorProfile;
use async_trait::async_trait;
use std::collections::HashMap;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Best-effort batch lookup. Identifiers with no matching account are
    /// simply absent from the result map; that is not an error here.
    async fn get_by_ids(&self, ids: &[String]) -> Result<HashMap<String, AuthorProfile>>;

    /// Resolve a profile by username. At most one match is expected.
    async fn get_by_username(&self, username: &str) -> Result<Option<AuthorProfile>>;
}
