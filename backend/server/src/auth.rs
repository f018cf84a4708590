//! Identity of the caller.
//!
//! Sessions are owned by the reverse proxy in front of this server. Once it has
//! validated a session it forwards the member id in [`USER_ID_HEADER`]; this
//! server only reads it.
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated member making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub u64);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}
