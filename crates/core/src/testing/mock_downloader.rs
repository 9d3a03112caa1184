//! Mock downloader for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{Downloader, FetchError};
use crate::fs_util::write_atomic;

/// A recorded download attempt for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedDownload {
    pub url: String,
    pub dest: PathBuf,
    pub success: bool,
}

/// Mock implementation of the Downloader trait.
///
/// Successful downloads really write a small file at the destination, so the
/// cache directory reflects what happened.
#[derive(Debug, Clone, Default)]
pub struct MockDownloader {
    downloads: Arc<RwLock<Vec<RecordedDownload>>>,
    failing: Arc<RwLock<HashMap<String, u16>>>,
}

impl MockDownloader {
    /// Create a new mock downloader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every download of `url` fail with `status`.
    pub async fn fail_url(&self, url: &str, status: u16) {
        self.failing.write().await.insert(url.to_string(), status);
    }

    /// Get all recorded download attempts.
    pub async fn recorded_downloads(&self) -> Vec<RecordedDownload> {
        self.downloads.read().await.clone()
    }

    /// Number of download attempts, successful or not.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let failure = self.failing.read().await.get(url).copied();

        let result = match failure {
            Some(status) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
            None => {
                let body = format!("poster from {}", url);
                write_atomic(dest, body.as_bytes())
                    .await
                    .map(|()| body.len() as u64)
                    .map_err(|source| FetchError::Write {
                        path: dest.to_path_buf(),
                        source,
                    })
            }
        };

        self.downloads.write().await.push(RecordedDownload {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            success: result.is_ok(),
        });

        result
    }
}
