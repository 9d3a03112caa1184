use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub credits: CreditsConfig,
    #[serde(default)]
    pub posters: PosterConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Where the filmography page comes from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Person identifier on the source site.
    #[serde(default = "default_name_id")]
    pub name_id: String,
    /// Page URL template; `{name_id}` is substituted.
    #[serde(default = "default_page_url")]
    pub page_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name_id: default_name_id(),
            page_url: default_page_url(),
        }
    }
}

fn default_name_id() -> String {
    "nm10457842".to_string()
}

fn default_page_url() -> String {
    "https://m.imdb.com/name/{name_id}/".to_string()
}

/// Role filter and ranking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreditsConfig {
    /// Accepted role phrasings, matched case-insensitively inside category labels.
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    /// Title ids pinned to the top, in this order.
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
    /// Prefix for the permalink of each title.
    #[serde(default = "default_permalink_base")]
    pub permalink_base: String,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            priority: default_priority(),
            permalink_base: default_permalink_base(),
        }
    }
}

fn default_roles() -> Vec<String> {
    vec![
        "cinematographer".to_string(),
        "director of photography".to_string(),
    ]
}

fn default_priority() -> Vec<String> {
    [
        "tt29414906",
        "tt34720347",
        "tt33055019",
        "tt36473776",
        "tt36671437",
        "tt22134246",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_permalink_base() -> String {
    "https://www.imdb.com/title/".to_string()
}

/// Poster cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PosterConfig {
    /// Local cache directory, one file per title id.
    #[serde(default = "default_poster_dir")]
    pub dir: PathBuf,
    /// Path prefix used for `src` attributes in the rendered markup.
    #[serde(default = "default_public_path")]
    pub public_path: String,
    /// File extension of cached posters (without the dot).
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Size/quality token substituted into poster URLs.
    #[serde(default = "default_size_token")]
    pub size_token: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            dir: default_poster_dir(),
            public_path: default_public_path(),
            extension: default_extension(),
            size_token: default_size_token(),
        }
    }
}

fn default_poster_dir() -> PathBuf {
    PathBuf::from("assets/posters")
}

fn default_public_path() -> String {
    "assets/posters".to_string()
}

fn default_extension() -> String {
    "jpg".to_string()
}

fn default_size_token() -> String {
    "QL75_UX500_".to_string()
}

/// Host document configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// Hand-authored page containing the generated region.
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
    /// Literal tokens that must open the block enclosing the region.
    #[serde(default = "default_anchor_open")]
    pub anchor_open: Vec<String>,
    /// Literal tokens that must close the block enclosing the region.
    #[serde(default = "default_anchor_close")]
    pub anchor_close: Vec<String>,
    /// Placeholder text rendered when no credits match.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
            anchor_open: default_anchor_open(),
            anchor_close: default_anchor_close(),
            empty_message: default_empty_message(),
        }
    }
}

fn default_document_path() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_start_marker() -> String {
    "<!-- AUTO-IMDB-START -->".to_string()
}

fn default_end_marker() -> String {
    "<!-- AUTO-IMDB-END -->".to_string()
}

fn default_anchor_open() -> Vec<String> {
    vec![r#"<div class="projects-track">"#.to_string()]
}

fn default_anchor_close() -> Vec<String> {
    vec!["</div>".to_string(), "</section>".to_string()]
}

fn default_empty_message() -> String {
    "No cinematographer credits found on IMDb.".to_string()
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Maximum redirects followed per request (default: 8)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

fn default_max_redirects() -> usize {
    8
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

/// Run behavior
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Compute and log the plan without touching the cache or the document.
    #[serde(default)]
    pub dry_run: bool,
}
