//! # Users
//!
//! Profile lookups, likes and registration.
//!
//! ## Profile lookup
//! - The configured default username skips the membership check entirely
//! - Anyone else must be registered here before we spend GitHub calls on them
//! - Profile first, then its `repos_url`; if either fails nothing is returned
//!
//! ## Likes
//! - Directional: the acting user's `likedProfiles` gains the target, the
//!   target's `likedBy` gains the acting user
//! - A repeat like is rejected, judged by the acting user's `likedProfiles`
//! - The store applies both sides in one atomic step and reports a repeat,
//!   so concurrent likes never overwrite each other
//!
//! ## Registration
//! - Find-or-create; the store claims the username and writes the record
//!   together, so a username never ends up with two records
use chrono::Utc;
use models::{LikeRecord, ProfileResponse, RegisterRequest, UserRecord};
use tracing::info;

use crate::{error::AppError, state::State, utils::validate_username};

pub const NOT_REGISTERED: &str = "This user is not registered in our app.";
pub const NOT_A_MEMBER: &str = "User is not a member";

pub async fn get_profile_and_repos(
    state: &State,
    username: &str,
) -> Result<ProfileResponse, AppError> {
    let username = validate_username(username)?;

    if username != state.config.default_username
        && state.store.find_by_username(username).await?.is_none()
    {
        return Err(AppError::NotFound(NOT_REGISTERED.to_string()));
    }

    let user_profile = state.github.fetch_profile(username).await?;

    let repos_url = user_profile
        .get("repos_url")
        .and_then(|url| url.as_str())
        .ok_or_else(|| AppError::internal("GitHub profile has no repos_url"))?;

    let repos = state.github.fetch_repos(repos_url).await?;

    info!("Served {username} with {} repositories", repos.len());

    Ok(ProfileResponse {
        user_profile,
        repos,
    })
}

pub async fn like_profile(state: &State, acting_id: u64, username: &str) -> Result<(), AppError> {
    let username = validate_username(username)?;

    let user = state
        .store
        .find_by_id(acting_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let user_to_like = state
        .store
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_A_MEMBER.to_string()))?;

    if user.id == user_to_like.id {
        return Err(AppError::MalformedPayload);
    }

    let like = LikeRecord::new(&user, Utc::now());

    if !state.store.add_like(user.id, &user_to_like, &like).await? {
        return Err(AppError::AlreadyLiked);
    }

    info!("{} liked {}", user.username, user_to_like.username);

    Ok(())
}

pub async fn get_likes(state: &State, acting_id: u64) -> Result<Vec<LikeRecord>, AppError> {
    let user = state
        .store
        .find_by_id(acting_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(user.liked_by)
}

/// Find-or-create. The flag is `true` when a new record was written.
pub async fn register_user(
    state: &State,
    request: RegisterRequest,
) -> Result<(UserRecord, bool), AppError> {
    validate_username(&request.username)?;

    if let Some(existing) = state.store.find_by_username(&request.username).await? {
        return Ok((existing, false));
    }

    let id = state.store.next_id().await?;

    let mut user = UserRecord::new(id, request.username, request.avatar_url);
    user.name = request.name;
    user.profile_url = request.profile_url;

    if !state.store.insert_if_absent(&user).await? {
        let existing = state
            .store
            .find_by_username(&user.username)
            .await?
            .ok_or_else(|| AppError::internal("claimed username has no record"))?;

        return Ok((existing, false));
    }

    info!("Registered {} as {}", user.username, user.id);

    Ok((user, true))
}
