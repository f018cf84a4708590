use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub github_api_url: String,
    pub github_token: String,
    /// Demo identity served straight from GitHub without a registration check.
    pub default_username: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("RUST_PORT", "5000")?,
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379")?,
            github_api_url: try_load("GITHUB_API_URL", "https://api.github.com")?,
            github_token: read_secret("GITHUB_API_KEY")?,
            default_username: try_load("DEFAULT_GITHUB_USER", "burakorkmez")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .map_err(|_| {
            warn!("Environment variable {key} not found, using default");
        })
        .ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}

/// Docker secret first, then a plain environment variable for local runs.
fn read_secret(secret_name: &str) -> Result<String> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => Ok(secret.trim().to_string()),
        Err(e) => {
            warn!("Failed to read {secret_name} from file: {e}");

            env::var(secret_name)
                .map(|s| s.trim().to_string())
                .with_context(|| format!("{secret_name} is neither a secret nor set in the environment"))
        }
    }
}
