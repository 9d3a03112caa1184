//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, Fetcher};

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status(u16),
}

/// Mock implementation of the Fetcher trait.
///
/// Unknown URLs answer with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub async fn set_response(&self, url: &str, body: impl Into<String>) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), MockResponse::Body(body.into()));
    }

    /// Answer `url` with a non-2xx status.
    pub async fn set_status(&self, url: &str, status: u16) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), MockResponse::Status(status));
    }

    /// URLs requested so far, in order.
    pub async fn recorded_requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.write().await.push(url.to_string());

        match self.responses.read().await.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
