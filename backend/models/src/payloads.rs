use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{LikeRecord, UserRecord};

/// Body of `GET /api/users/profile/{username}`.
///
/// The backend fills it with raw GitHub JSON; the front end decodes it into
/// [`GithubProfile`](crate::GithubProfile) and [`Repository`](crate::Repository).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse<P = Value, R = Value> {
    pub user_profile: P,
    pub repos: Vec<R>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub liked_by: Vec<LikeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserRecord,
}
