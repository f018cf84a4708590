use async_trait::async_trait;
use models::{
    ErrorResponse, GithubProfile, LikeRecord, LikesResponse, MessageResponse, ProfileResponse,
    RegisterRequest, RegisterResponse, Repository, UserRecord,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use thiserror::Error;
use tracing::debug;

pub const USER_ID_HEADER: &str = "x-user-id";

pub type Profile = ProfileResponse<GithubProfile, Repository>;

#[derive(Error, Debug)]
pub enum FetchError {
    /// 404 from the backend, carrying its message.
    #[error("{0}")]
    NotRegistered(String),

    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("No user id configured, pass --user-id or set DEVFINDER_USER_ID")]
    MissingIdentity,

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// What the home view needs from the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn profile(&self, username: &str) -> Result<Profile, FetchError>;
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    user_id: Option<u64>,
}

impl ApiClient {
    pub fn new(base_url: &str, user_id: Option<u64>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("devfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/users/{path}", self.base_url)
    }

    fn authenticated(&self, request: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        let user_id = self.user_id.ok_or(FetchError::MissingIdentity)?;

        Ok(request.header(USER_ID_HEADER, user_id.to_string()))
    }

    pub async fn like(&self, username: &str) -> Result<String, FetchError> {
        let request = self.authenticated(self.client.post(self.url(&format!("like/{username}"))))?;
        let response = check(request.send().await?).await?;

        Ok(response.json::<MessageResponse>().await?.message)
    }

    pub async fn likes(&self) -> Result<Vec<LikeRecord>, FetchError> {
        let request = self.authenticated(self.client.get(self.url("likes")))?;
        let response = check(request.send().await?).await?;

        Ok(response.json::<LikesResponse>().await?.liked_by)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserRecord, FetchError> {
        let response = self
            .client
            .post(self.url("register"))
            .json(request)
            .send()
            .await?;
        let response = check(response).await?;

        Ok(response.json::<RegisterResponse>().await?.user)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn profile(&self, username: &str) -> Result<Profile, FetchError> {
        debug!("Requesting profile {username}");

        let response = self
            .client
            .get(self.url(&format!("profile/{username}")))
            .send()
            .await?;

        Ok(check(response).await?.json::<Profile>().await?)
    }
}

/// Turns a non-2xx response into an error, keeping the backend's `{error}` text.
async fn check(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotRegistered(message));
    }

    Err(FetchError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_api_users() {
        let client = ApiClient::new("http://localhost:5000/", None).unwrap();

        assert_eq!(
            client.url("profile/octocat"),
            "http://localhost:5000/api/users/profile/octocat"
        );
    }

    #[tokio::test]
    async fn like_without_identity_fails_before_sending() {
        let client = ApiClient::new("http://127.0.0.1:1", None).unwrap();

        let err = client.like("octocat").await.unwrap_err();

        assert!(matches!(err, FetchError::MissingIdentity));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Some(1)).unwrap();

        let err = client.profile("octocat").await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }
}
