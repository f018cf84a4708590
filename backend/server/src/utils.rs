use std::sync::LazyLock;

use models::MAX_USERNAME_LEN;
use regex::Regex;

use crate::error::AppError;

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap());

/// Rejects anything that cannot be a GitHub login before it reaches the store
/// or gets spliced into an upstream URL.
pub fn validate_username(username: &str) -> Result<&str, AppError> {
    if username.len() > MAX_USERNAME_LEN || !USERNAME.is_match(username) {
        return Err(AppError::MalformedUsername);
    }

    Ok(username)
}
