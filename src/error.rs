//! Typed errors for the two seams where callers must tell failure kinds apart:
//! startup configuration and calls into the Reddit API.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors. Raised before any collection begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credentials file not found at: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("credentials file {} could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("missing credential keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

/// Failure of a single API call. Collection code catches these per unit
/// (one subreddit, one query x subreddit pair, one post) and moves on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange failed with status {0}")]
    Token(u16),

    #[error("request to {endpoint} failed with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response shape from {endpoint}: {reason}")]
    Shape { endpoint: String, reason: String },
}
