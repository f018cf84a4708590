//! # DevFinder
//!
//! Terminal front end for the DevFinder backend.
//!
//! ## Pieces
//! - [`api`]: typed HTTP client for the backend routes
//! - [`home`]: state of the home view (profile, repositories, sort mode, toast)
//! - [`sort`]: the client-side repository sort
//! - [`render`]: plain text output
//!
//! ## Flow
//! - On start the configured default user is loaded
//! - A search clears whatever is shown, fetches, then resets the sort to recent
//! - Sorting never refetches, it reorders what is already held
//! - Any failed lookup leaves the empty view plus a toast
pub mod api;
pub mod home;
pub mod render;
pub mod sort;

pub use api::{ApiClient, Backend, FetchError, Profile};
pub use home::HomePage;
pub use sort::{SortKey, sort_repos};
