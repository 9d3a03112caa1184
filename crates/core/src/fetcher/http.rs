//! `reqwest` implementation of [`Fetcher`] and [`Downloader`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client, Response};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::error::FetchError;
use super::traits::{Downloader, Fetcher};
use crate::config::HttpConfig;
use crate::fs_util::write_atomic;

/// HTTP client with bounded timeout and redirect count.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client from configuration.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| FetchError::InvalidConfig(format!("accept_language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Send a GET and require a 2xx terminal status.
    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_redirect() {
                FetchError::TooManyRedirects {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Downloader for HttpClient {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;

        write_atomic(dest, &bytes)
            .await
            .map_err(|source| FetchError::Write {
                path: dest.to_path_buf(),
                source,
            })?;

        debug!("Wrote {} bytes to {:?}", bytes.len(), dest);
        Ok(bytes.len() as u64)
    }
}
