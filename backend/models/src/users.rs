use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered member of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    pub avatar_url: String,
    /// Usernames this user has liked. Each appears at most once.
    #[serde(default)]
    pub liked_profiles: Vec<String>,
    /// Who liked this user, oldest first.
    #[serde(default)]
    pub liked_by: Vec<LikeRecord>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    pub username: String,
    pub avatar_url: String,
    pub liked_date: DateTime<Utc>,
}

impl LikeRecord {
    /// A like by `liker`, stamped `at`.
    pub fn new(liker: &UserRecord, at: DateTime<Utc>) -> Self {
        Self {
            username: liker.username.clone(),
            avatar_url: liker.avatar_url.clone(),
            liked_date: at,
        }
    }
}

impl UserRecord {
    pub fn new(id: u64, username: String, avatar_url: String) -> Self {
        Self {
            id,
            username,
            name: None,
            profile_url: None,
            avatar_url,
            liked_profiles: Vec::new(),
            liked_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_liked(&self, username: &str) -> bool {
        self.liked_profiles.iter().any(|liked| liked == username)
    }
}
