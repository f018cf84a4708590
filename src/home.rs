//! # Home view
//!
//! Display state only. All data comes from the backend through [`Backend`].
//!
//! ## Toasts
//! - 404: the backend's own message, e.g. "This user is not registered in our app."
//! - any other failed status: [`PROFILE_NOT_FOUND`]
//! - network failure: [`GENERIC_ERROR`]
//!
//! Every failure also drops back to the empty view.
use models::{GithubProfile, Repository};
use tracing::warn;

use crate::{
    api::{Backend, FetchError},
    sort::{SortKey, sort_repos},
};

pub const PROFILE_NOT_FOUND: &str = "User profile not found.";
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

#[derive(Debug, Default)]
pub struct HomePage {
    pub user_profile: Option<GithubProfile>,
    pub repos: Vec<Repository>,
    pub loading: bool,
    pub sort_type: SortKey,
    /// Last error shown to the user, cleared by the next fetch.
    pub toast: Option<String>,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches `username` and shows it with repositories newest first.
    pub async fn load<B>(&mut self, backend: &B, username: &str)
    where
        B: Backend + ?Sized,
    {
        self.loading = true;
        self.toast = None;

        match backend.profile(username).await {
            Ok(mut data) => {
                sort_repos(&mut data.repos, SortKey::Recent);
                self.repos = data.repos;
                self.user_profile = Some(data.user_profile);
            }
            Err(e) => {
                warn!("Lookup of {username} failed: {e}");

                let message = match e {
                    FetchError::NotRegistered(message) => message,
                    FetchError::Status { .. } => PROFILE_NOT_FOUND.to_string(),
                    FetchError::Network(_) | FetchError::MissingIdentity => {
                        GENERIC_ERROR.to_string()
                    }
                };

                self.clear();
                self.toast = Some(message);
            }
        }

        self.loading = false;
    }

    /// Clears the current view, loads `username`, then resets the sort mode.
    pub async fn search<B>(&mut self, backend: &B, username: &str)
    where
        B: Backend + ?Sized,
    {
        self.clear();
        self.load(backend, username.trim()).await;
        self.sort_type = SortKey::Recent;
    }

    pub fn on_sort(&mut self, sort_type: SortKey) {
        sort_repos(&mut self.repos, sort_type);
        self.sort_type = sort_type;
    }

    /// Sorting is only offered once there is something to sort.
    pub fn can_sort(&self) -> bool {
        !self.repos.is_empty()
    }

    fn clear(&mut self) {
        self.user_profile = None;
        self.repos.clear();
    }
}
