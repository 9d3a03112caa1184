//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or downloading.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal response was not 2xx.
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Redirect chain exceeded the configured limit.
    #[error("Too many redirects for {url}")]
    TooManyRedirects { url: String },

    /// Client could not be built from configuration.
    #[error("Invalid HTTP client configuration: {0}")]
    InvalidConfig(String),

    /// Downloaded body could not be stored.
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
