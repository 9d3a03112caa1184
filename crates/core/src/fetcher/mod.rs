//! Network collaborators: fetching page text and materializing poster files.
//!
//! Both are expressed as traits so the sync runner can be driven by mocks
//! (see [`crate::testing`]). [`HttpClient`] is the `reqwest`-backed
//! implementation of both.

mod error;
mod http;
mod traits;

pub use error::FetchError;
pub use http::HttpClient;
pub use traits::{Downloader, Fetcher};
