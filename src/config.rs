//! Startup configuration: where collections live and whether a remote table
//! API replaces the local files.
//!
//! Build a [`StoreConfig`] once, hand it to [`Storage::open`](crate::Storage::open),
//! and never touch it again.

use std::path::PathBuf;
use tracing::debug;

/// Explicit local storage directory.
pub const ENV_DATA_DIR: &str = "CASEBOOK_DATA_DIR";
/// Base URL of the remote table API.
pub const ENV_REST_URL: &str = "CASEBOOK_REST_URL";
/// Access key for the remote table API.
pub const ENV_REST_KEY: &str = "CASEBOOK_REST_KEY";
/// Set by the hosting platform; its project directory is read-only.
pub const ENV_HOSTED_MARKER: &str = "VERCEL";

/// Endpoint and key for the remote table backend.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL, no trailing slash.
    pub url: String,
    /// Sent as both `apikey` and bearer credential.
    pub key: String,
}

impl RemoteConfig {
    /// `Some` only when both values are present and non-blank.
    pub fn from_parts(url: Option<String>, key: Option<String>) -> Option<Self> {
        let url = non_blank(url)?;
        let key = non_blank(key)?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
        })
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Everything the storage layer needs to decide on a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON document per collection.
    pub data_dir: PathBuf,
    /// Remote table API, when configured.
    pub remote: Option<RemoteConfig>,
}

impl StoreConfig {
    /// Local files only, in `data_dir`.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            remote: None,
        }
    }

    /// Use the remote table API at `url` with `key`. Blank values leave the
    /// config on local files.
    pub fn with_remote(mut self, url: impl Into<String>, key: impl Into<String>) -> Self {
        self.remote = RemoteConfig::from_parts(Some(url.into()), Some(key.into()));
        self
    }

    /// Read configuration from the process environment, loading `.env` first
    /// if one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Data directory: [`ENV_DATA_DIR`] if set, else a temp-dir location when
    /// [`ENV_HOSTED_MARKER`] is set, else `./data` under the working directory.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match non_blank(lookup(ENV_DATA_DIR)) {
            Some(dir) => PathBuf::from(dir),
            None if lookup(ENV_HOSTED_MARKER).is_some() => std::env::temp_dir().join("casebook-data"),
            None => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("data"),
        };
        let remote = RemoteConfig::from_parts(lookup(ENV_REST_URL), lookup(ENV_REST_KEY));
        Self { data_dir, remote }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
