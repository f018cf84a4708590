//! # GitHub
//!
//! Upstream for every profile lookup.
//!
//! A lookup is two calls in a row: the user object, then the repository
//! listing behind the `repos_url` that object carries. The second call needs
//! the first one's body, so they cannot overlap.
//!
//! Nothing is cached and nothing is retried. A failed call surfaces as
//! [`AppError::Upstream`] carrying GitHub's own status code.
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppError;

pub const PROFILE_ERROR: &str = "Failed to fetch user profile from GitHub.";
pub const REPOS_ERROR: &str = "Failed to fetch repositories from GitHub.";

#[async_trait]
pub trait Upstream: Send + Sync {
    /// `GET /users/{username}`, returned as-is.
    async fn fetch_profile(&self, username: &str) -> Result<Value, AppError>;

    /// Follows a `repos_url` taken from a profile.
    async fn fetch_repos(&self, repos_url: &str) -> Result<Vec<Value>, AppError>;
}

pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("devfinder-server"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AppError::internal("GitHub token is not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T>(&self, url: &str, message: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("GitHub returned {status} for {url}");

            return Err(AppError::Upstream {
                status,
                message: message.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Upstream for GithubClient {
    async fn fetch_profile(&self, username: &str) -> Result<Value, AppError> {
        let url = format!("{}/users/{username}", self.base_url);
        info!("Fetching GitHub profile {username}");

        self.get_json(&url, PROFILE_ERROR).await
    }

    async fn fetch_repos(&self, repos_url: &str) -> Result<Vec<Value>, AppError> {
        self.get_json(repos_url, REPOS_ERROR).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = GithubClient::new("https://api.github.com/", "token").unwrap();

        assert_eq!(client.base_url, "https://api.github.com");
    }

    #[test]
    fn rejects_token_with_newline() {
        assert!(GithubClient::new("https://api.github.com", "bad\ntoken").is_err());
    }

    #[tokio::test]
    async fn unreachable_upstream_is_internal_error() {
        let client = GithubClient::new("http://127.0.0.1:1", "token").unwrap();
        let err = client.fetch_profile("octocat").await.unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }
}
