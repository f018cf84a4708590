//! Backend of DevFinder, a GitHub profile explorer.
//!
//! Look up a GitHub username, see the profile and repositories, and like other
//! members of the app.
//!
//!
//!
//! # General Infrastructure
//! - Browser talks to the reverse proxy, which serves the front end and
//!   forwards `/api` to this server
//! - The proxy owns login sessions and forwards the member id as `x-user-id`
//! - This server talks to GitHub and to Redis, nothing else
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Auth | Body |
//! |---|---|---|---|
//! | GET | `/api/users/profile/{username}` | no | `{userProfile, repos}` |
//! | POST | `/api/users/like/{username}` | yes | `{message}` |
//! | GET | `/api/users/likes` | yes | `{likedBy}` |
//! | POST | `/api/users/register` | no | `{user}` |
//!
//! Failures are `{error}` with the status from [`error::AppError`].
//!
//!
//!
//! # Notes
//!
//! ## Default user
//! The landing page shows a demo profile before anyone searches. That
//! username (`DEFAULT_GITHUB_USER`) is proxied to GitHub without checking
//! membership, so a fresh deployment with an empty store still renders.
//!
//! ## GitHub quota
//! Every lookup costs two GitHub calls and nothing is cached. When GitHub
//! starts refusing, its status code is passed straight through.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! export GITHUB_API_KEY=ghp_...
//! export REDIS_URL=redis://127.0.0.1:6379
//! export RUST_LOG=info
//! ```
//!
//! Run.
//! ```sh
//! cargo run -p devfinder-backend
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderName, Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod github;
pub mod routes;
pub mod state;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

use auth::USER_ID_HEADER;
use routes::{like_handler, likes_handler, profile_handler, register_handler};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new().await?;

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/users/profile/{username}", get(profile_handler))
        .route("/api/users/like/{username}", post(like_handler))
        .route("/api/users/likes", get(likes_handler))
        .route("/api/users/register", post(register_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            return;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
