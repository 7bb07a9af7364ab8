use std::{path::PathBuf, time::Duration};

use quotebook_core::constants::{
    DEFAULT_FETCH_LIMIT, DEFAULT_SERVER_URL, DEFAULT_SYNC_INTERVAL_SECS,
};
use quotebook_remote::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub server_url: String,
    pub sync_interval: Duration,
    pub fetch_limit: usize,
    pub request_timeout: Duration,
    pub push_on_sync: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Unparseable or non-positive numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("QB_DATA_DIR").unwrap_or_else(|| "./data".into());
        let server_url = lookup("QB_SERVER_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.into());
        let interval_secs = positive(lookup("QB_SYNC_INTERVAL_SECS"), DEFAULT_SYNC_INTERVAL_SECS);
        let fetch_limit = positive(lookup("QB_FETCH_LIMIT"), DEFAULT_FETCH_LIMIT as u64) as usize;
        let timeout_ms = positive(lookup("QB_REQUEST_TIMEOUT_MS"), DEFAULT_TIMEOUT_SECS * 1000);
        let push_on_sync = lookup("QB_PUSH_ON_SYNC")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            data_dir: PathBuf::from(data_dir),
            server_url,
            sync_interval: Duration::from_secs(interval_secs),
            fetch_limit,
            request_timeout: Duration::from_millis(timeout_ms),
            push_on_sync,
        }
    }
}

fn positive(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
