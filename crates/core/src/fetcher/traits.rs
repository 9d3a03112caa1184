//! Trait definitions for the fetcher module.

use async_trait::async_trait;
use std::path::Path;

use super::error::FetchError;

/// Fetches a URL and returns the response body as text.
///
/// Implementations follow redirects up to a bounded count, enforce a timeout,
/// and fail on a non-2xx terminal status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Downloads a URL into a file.
///
/// The body is written next to `dest` first and renamed into place, so `dest`
/// either keeps its previous state or holds the complete new body.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Returns the number of bytes written.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher;

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            if url.starts_with("https://") {
                Ok(format!("body of {}", url))
            } else {
                Err(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            }
        }
    }

    #[test]
    fn test_fetcher_as_trait_object() {
        let fetcher: Box<dyn Fetcher> = Box::new(StaticFetcher);

        let body = tokio_test::block_on(fetcher.fetch_text("https://example.com/")).unwrap();
        assert_eq!(body, "body of https://example.com/");

        let err = tokio_test::block_on(fetcher.fetch_text("ftp://example.com/")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "HTTP 404 for ftp://example.com/");
    }
}
