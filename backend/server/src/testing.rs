//! In-process fakes for the store and GitHub.
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::http::StatusCode;
use models::{LikeRecord, UserRecord};
use serde_json::{Value, json};
use tokio::task::yield_now;

use crate::{
    config::Config,
    database::UserStore,
    error::AppError,
    github::{PROFILE_ERROR, REPOS_ERROR, Upstream},
    state::State,
};

pub const DEFAULT_USER: &str = "octocat";

pub fn test_config() -> Config {
    Config {
        port: 0,
        redis_url: "redis://127.0.0.1:6379".into(),
        github_api_url: "https://api.github.test".into(),
        github_token: "test-token".into(),
        default_username: DEFAULT_USER.into(),
    }
}

#[derive(Default)]
struct Users {
    by_id: HashMap<u64, UserRecord>,
    next_id: u64,
}

/// Process-local [`UserStore`]. Each call takes the lock once, so the
/// check-and-write operations are atomic the same way the Redis scripts are.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<tokio::sync::Mutex<Users>>,
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.users.lock().await.by_id.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.lock().await.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .lock()
            .await
            .by_id
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn next_id(&self) -> Result<u64, AppError> {
        let mut users = self.users.lock().await;
        users.next_id += 1;

        Ok(users.next_id)
    }

    async fn insert_if_absent(&self, user: &UserRecord) -> Result<bool, AppError> {
        let mut users = self.users.lock().await;
        if users.by_id.values().any(|u| u.username == user.username) {
            return Ok(false);
        }

        users.by_id.insert(user.id, user.clone());

        Ok(true)
    }

    async fn add_like(
        &self,
        liker_id: u64,
        target: &UserRecord,
        like: &LikeRecord,
    ) -> Result<bool, AppError> {
        let mut users = self.users.lock().await;

        let Some(liker) = users.by_id.get_mut(&liker_id) else {
            return Err(AppError::internal("liker vanished"));
        };
        if liker.has_liked(&target.username) {
            return Ok(false);
        }
        liker.liked_profiles.push(target.username.clone());

        if let Some(target) = users.by_id.get_mut(&target.id) {
            target.liked_by.push(like.clone());
        }

        Ok(true)
    }
}

/// Counts username lookups on top of a [`MemoryStore`], and yields before
/// every call so concurrent requests interleave between store calls.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn get(&self, id: u64) -> UserRecord {
        self.inner.find_by_id(id).await.unwrap().unwrap()
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, AppError> {
        yield_now().await;
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        yield_now().await;
        self.inner.find_by_username(username).await
    }

    async fn next_id(&self) -> Result<u64, AppError> {
        yield_now().await;
        self.inner.next_id().await
    }

    async fn insert_if_absent(&self, user: &UserRecord) -> Result<bool, AppError> {
        yield_now().await;
        self.inner.insert_if_absent(user).await
    }

    async fn add_like(
        &self,
        liker_id: u64,
        target: &UserRecord,
        like: &LikeRecord,
    ) -> Result<bool, AppError> {
        yield_now().await;
        self.inner.add_like(liker_id, target, like).await
    }
}

#[derive(Default)]
struct GithubCalls {
    profiles: Vec<String>,
    repos: Vec<String>,
    fail_profile: Option<StatusCode>,
    fail_repos: Option<StatusCode>,
}

/// Canned GitHub that records what was asked of it.
#[derive(Default)]
pub struct FakeGithub {
    calls: Mutex<GithubCalls>,
}

impl FakeGithub {
    pub fn fail_profile(&self, status: StatusCode) {
        self.calls.lock().unwrap().fail_profile = Some(status);
    }

    pub fn fail_repos(&self, status: StatusCode) {
        self.calls.lock().unwrap().fail_repos = Some(status);
    }

    pub fn profile_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().profiles.clone()
    }

    pub fn repo_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().repos.clone()
    }

    pub fn profile_for(&self, username: &str) -> Value {
        json!({
            "login": username,
            "avatar_url": format!("https://avatars.test/{username}.png"),
            "html_url": format!("https://github.test/{username}"),
            "repos_url": format!("https://api.github.test/users/{username}/repos"),
            "name": null,
            "bio": null,
            "location": null,
            "public_repos": 2,
            "followers": 10,
            "following": 1,
            "created_at": "2015-06-01T12:00:00Z",
        })
    }

    pub fn repos(&self) -> Vec<Value> {
        vec![
            json!({
                "name": "older",
                "html_url": "https://github.test/o/older",
                "description": null,
                "language": "Rust",
                "created_at": "2020-01-01T00:00:00Z",
                "stargazers_count": 12,
                "forks_count": 1,
            }),
            json!({
                "name": "newer",
                "html_url": "https://github.test/o/newer",
                "description": "fresh",
                "language": null,
                "created_at": "2024-01-01T00:00:00Z",
                "stargazers_count": 3,
                "forks_count": 8,
            }),
        ]
    }
}

#[async_trait]
impl Upstream for FakeGithub {
    async fn fetch_profile(&self, username: &str) -> Result<Value, AppError> {
        let fail = {
            let mut calls = self.calls.lock().unwrap();
            calls.profiles.push(username.to_string());
            calls.fail_profile
        };

        match fail {
            Some(status) => Err(AppError::Upstream {
                status,
                message: PROFILE_ERROR.into(),
            }),
            None => Ok(self.profile_for(username)),
        }
    }

    async fn fetch_repos(&self, repos_url: &str) -> Result<Vec<Value>, AppError> {
        let fail = {
            let mut calls = self.calls.lock().unwrap();
            calls.repos.push(repos_url.to_string());
            calls.fail_repos
        };

        match fail {
            Some(status) => Err(AppError::Upstream {
                status,
                message: REPOS_ERROR.into(),
            }),
            None => Ok(self.repos()),
        }
    }
}

pub struct TestHarness {
    pub state: Arc<State>,
    pub store: Arc<CountingStore>,
    pub github: Arc<FakeGithub>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(CountingStore::default());
        let github = Arc::new(FakeGithub::default());
        let state = State::from_parts(test_config(), store.clone(), github.clone());

        Self {
            state,
            store,
            github,
        }
    }

    /// Writes a member straight into the store, bypassing lookup counting.
    pub async fn register(&self, username: &str) -> UserRecord {
        let id = self.store.inner.next_id().await.unwrap();
        let user = UserRecord::new(
            id,
            username.to_string(),
            format!("https://avatars.test/{username}.png"),
        );
        assert!(self.store.inner.insert_if_absent(&user).await.unwrap());

        user
    }
}
