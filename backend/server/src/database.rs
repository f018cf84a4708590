//! # Redis
//!
//! Document store for user records.
//!
//! Core purpose is to look users up by id (the authenticated identity) or by
//! username (profile lookups, like targets) and to record likes.
//!
//! ## Implementation
//!
//! - `users` hash: id -> JSON encoded [`UserRecord`] profile fields
//! - `users:by_username` hash: username -> id
//! - `users:next_id` counter, `INCR` hands out ids
//! - `user:{id}:liked` set: usernames this user liked
//! - `user:{id}:liked_by` list: JSON encoded [`LikeRecord`]s, oldest first
//!
//! Like lists never round-trip through the server. Both writes that make up
//! a like, and both writes that make up a registration, run as one Lua
//! script, so Redis applies them together or not at all and concurrent
//! requests cannot overwrite each other.
use async_trait::async_trait;
use models::{LikeRecord, UserRecord};
use redis::{
    AsyncCommands, Client, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::info;

use crate::error::AppError;

pub const USERS_KEY: &str = "users";
pub const USERNAMES_KEY: &str = "users:by_username";
pub const NEXT_ID_KEY: &str = "users:next_id";

/// KEYS: usernames index, users hash. ARGV: username, id, record JSON.
const REGISTER_SCRIPT: &str = r"
if redis.call('HSETNX', KEYS[1], ARGV[1], ARGV[2]) == 0 then
    return 0
end
redis.call('HSET', KEYS[2], ARGV[2], ARGV[3])
return 1
";

/// KEYS: liker's liked set, target's liked_by list. ARGV: target username, like JSON.
const LIKE_SCRIPT: &str = r"
if redis.call('SADD', KEYS[1], ARGV[1]) == 0 then
    return 0
end
redis.call('RPUSH', KEYS[2], ARGV[2])
return 1
";

fn liked_key(id: u64) -> String {
    format!("user:{id}:liked")
}

fn liked_by_key(id: u64) -> String {
    format!("user:{id}:liked_by")
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Hands out an id no other record has used.
    async fn next_id(&self) -> Result<u64, AppError>;

    /// Claims `user.username` and writes the record in one step.
    /// `false` when the username was already taken; nothing is written then.
    async fn insert_if_absent(&self, user: &UserRecord) -> Result<bool, AppError>;

    /// Adds `target` to the liker's liked profiles and `like` to the target's
    /// liked-by list in one step. `false` when the liker already liked
    /// `target`; nothing is written then.
    async fn add_like(
        &self,
        liker_id: u64,
        target: &UserRecord,
        like: &LikeRecord,
    ) -> Result<bool, AppError>;
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let config = ConnectionManagerConfig::new().set_number_of_retries(1);

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    info!("Connected to Redis at {redis_url}");

    Ok(connection_manager)
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStore for RedisStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, AppError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.hget(USERS_KEY, id).await?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut user: UserRecord = serde_json::from_str(&raw)?;

        let (mut liked_profiles, liked_by): (Vec<String>, Vec<String>) = redis::pipe()
            .smembers(liked_key(id))
            .lrange(liked_by_key(id), 0, -1)
            .query_async(&mut connection)
            .await?;

        liked_profiles.sort();
        user.liked_profiles = liked_profiles;
        user.liked_by = liked_by
            .iter()
            .map(|json| serde_json::from_str(json))
            .collect::<Result<_, _>>()?;

        Ok(Some(user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let mut connection = self.connection.clone();
        let id: Option<u64> = connection.hget(USERNAMES_KEY, username).await?;

        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn next_id(&self) -> Result<u64, AppError> {
        let mut connection = self.connection.clone();
        let id: u64 = connection.incr(NEXT_ID_KEY, 1).await?;

        Ok(id)
    }

    async fn insert_if_absent(&self, user: &UserRecord) -> Result<bool, AppError> {
        let mut connection = self.connection.clone();
        let json = serde_json::to_string(user)?;

        let inserted: i64 = Script::new(REGISTER_SCRIPT)
            .key(USERNAMES_KEY)
            .key(USERS_KEY)
            .arg(&user.username)
            .arg(user.id)
            .arg(json)
            .invoke_async(&mut connection)
            .await?;

        Ok(inserted == 1)
    }

    async fn add_like(
        &self,
        liker_id: u64,
        target: &UserRecord,
        like: &LikeRecord,
    ) -> Result<bool, AppError> {
        let mut connection = self.connection.clone();
        let json = serde_json::to_string(like)?;

        let added: i64 = Script::new(LIKE_SCRIPT)
            .key(liked_key(liker_id))
            .key(liked_by_key(target.id))
            .arg(&target.username)
            .arg(json)
            .invoke_async(&mut connection)
            .await?;

        Ok(added == 1)
    }
}
