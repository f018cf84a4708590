//! Types shared between the backend and the front end.
//!
//! The backend serves these as JSON and the front end decodes them again, so
//! field names here are the wire contract.
pub mod github;
pub mod payloads;
pub mod users;

pub use github::{GithubProfile, Repository};
pub use payloads::{
    ErrorResponse, LikesResponse, MessageResponse, ProfileResponse, RegisterRequest,
    RegisterResponse,
};
pub use users::{LikeRecord, UserRecord};

/// Longest login GitHub hands out.
pub const MAX_USERNAME_LEN: usize = 39;
