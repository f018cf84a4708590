use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
};
use models::{LikesResponse, MessageResponse, ProfileResponse, RegisterRequest, RegisterResponse};

use crate::{
    auth::AuthUser,
    error::AppError,
    state::State,
    users::{get_likes, get_profile_and_repos, like_profile, register_user},
};

pub async fn profile_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = get_profile_and_repos(&state, &username).await?;

    Ok(Json(profile))
}

pub async fn like_handler(
    AxumState(state): AxumState<Arc<State>>,
    AuthUser(user_id): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    like_profile(&state, user_id, &username).await?;

    Ok(Json(MessageResponse {
        message: "User liked".to_string(),
    }))
}

pub async fn likes_handler(
    AxumState(state): AxumState<Arc<State>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<LikesResponse>, AppError> {
    let liked_by = get_likes(&state, user_id).await?;

    Ok(Json(LikesResponse { liked_by }))
}

pub async fn register_handler(
    AxumState(state): AxumState<Arc<State>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, created) = register_user(&state, payload).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(RegisterResponse { user })))
}
