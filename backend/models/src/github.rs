//! Views over GitHub REST objects.
//!
//! The backend forwards GitHub JSON untouched; only the front end decodes it,
//! and only the fields it renders or sorts on.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subset of `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub repos_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
}

/// One entry of a user's `repos_url` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}
