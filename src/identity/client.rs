/// HTTP client for the external identity provider
use crate::config::IdentityConfig;
use crate::error::{AppError, Result};
use crate::identity::IdentityProvider;
use crate::models::AuthorProfile;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Raw provider user record, before projection.
#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    username: Option<String>,
    #[serde(default)]
    profile_image_url: String,
}

/// Narrow a provider record to the fields the service exposes.
fn filter_user_for_client(user: ProviderUser) -> AuthorProfile {
    AuthorProfile {
        id: user.id,
        username: user.username,
        profile_picture_url: user.profile_image_url,
    }
}

pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch_users(&self, query: &[(&str, &str)]) -> Result<Vec<ProviderUser>> {
        let url = format!("{}/v1/users", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("identity provider request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Identity(format!(
                "identity provider returned {}",
                response.status()
            )));
        }

        let users = response
            .json::<Vec<ProviderUser>>()
            .await
            .map_err(|e| AppError::Identity(format!("invalid identity provider response: {}", e)))?;

        Ok(users)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityClient {
    async fn get_by_ids(&self, ids: &[String]) -> Result<HashMap<String, AuthorProfile>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let limit = ids.len().to_string();
        let mut query: Vec<(&str, &str)> =
            ids.iter().map(|id| ("user_id", id.as_str())).collect();
        query.push(("limit", limit.as_str()));

        let users = self.fetch_users(&query).await?;

        Ok(users
            .into_iter()
            .map(filter_user_for_client)
            .map(|profile| (profile.id.clone(), profile))
            .collect())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<AuthorProfile>> {
        let users = self.fetch_users(&[("username", username)]).await?;

        if users.len() > 1 {
            // Provider nominally guarantees username uniqueness; first match
            // wins when it does not.
            tracing::warn!(
                username,
                matches = users.len(),
                "identity provider returned multiple users for username"
            );
        }

        Ok(users.into_iter().next().map(filter_user_for_client))
    }
}
