//! Testing utilities and mock collaborators.
//!
//! The mocks implement [`Fetcher`](crate::fetcher::Fetcher) and
//! [`Downloader`](crate::fetcher::Downloader) without any network access, so
//! a whole sync run can be exercised against a temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelsync_core::testing::{fixtures, MockDownloader, MockFetcher};
//!
//! let fetcher = MockFetcher::new();
//! fetcher.set_response(url, fixtures::name_page(&tree)).await;
//!
//! let downloader = MockDownloader::new();
//! downloader.fail_url("https://img/broken.jpg", 404).await;
//! ```

mod mock_downloader;
mod mock_fetcher;

pub use mock_downloader::{MockDownloader, RecordedDownload};
pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A raw credit node as found in the filmography tree.
    pub fn credit_node(
        category: &str,
        id: &str,
        name: Option<&str>,
        year: Option<i64>,
        title_type: Option<&str>,
        poster_url: Option<&str>,
    ) -> Value {
        let mut title = json!({ "id": id });
        if let Some(name) = name {
            title["titleText"] = json!({ "text": name });
        }
        if let Some(year) = year {
            title["releaseYear"] = json!({ "year": year });
        }
        if let Some(kind) = title_type {
            title["titleType"] = json!({ "text": kind });
        }
        if let Some(url) = poster_url {
            title["primaryImage"] = json!({ "url": url });
        }
        json!({
            "creditedRoles": { "edges": [ { "node": { "category": { "text": category } } } ] },
            "title": title
        })
    }

    /// A cinematographer credit with every field populated.
    pub fn cinematography_credit(id: &str, name: &str, year: i64, poster_url: &str) -> Value {
        credit_node(
            "Cinematographer",
            id,
            Some(name),
            Some(year),
            Some("Movie"),
            Some(poster_url),
        )
    }

    /// Wrap credit nodes the way the name page nests them.
    pub fn filmography(credits: Vec<Value>) -> Value {
        json!({
            "props": {
                "pageProps": {
                    "mainColumnData": {
                        "released": { "edges": credits.into_iter().map(|c| json!({ "node": c })).collect::<Vec<_>>() }
                    }
                }
            }
        })
    }

    /// An HTML page embedding `tree` in its `__NEXT_DATA__` script.
    pub fn name_page(tree: &Value) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>Name</title></head><body>\
             <script id=\"__NEXT_DATA__\" type=\"application/json\">{}</script>\
             </body></html>",
            tree
        )
    }

    /// A host document with an empty generated region using the default markers.
    pub fn host_document() -> String {
        [
            "<!DOCTYPE html>",
            "<html>",
            "<body>",
            "    <section id=\"projects\">",
            "        <h2>Projects</h2>",
            "        <div class=\"projects-track\">",
            "<!-- AUTO-IMDB-START -->",
            "<!-- AUTO-IMDB-END -->",
            "        </div>",
            "    </section>",
            "    <footer>&copy; hand written</footer>",
            "</body>",
            "</html>",
            "",
        ]
        .join("\n")
    }
}
