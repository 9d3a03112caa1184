//! Sync lifecycle integration tests.
//!
//! These tests drive the full runner with a mock fetcher and downloader
//! against a temporary site directory:
//! - Extraction, merge and ranking from an embedded name page
//! - Poster cache convergence and stale pruning
//! - Idempotent re-runs
//! - Fatal structural failures leaving artifacts untouched

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use reelsync_core::{
    testing::{fixtures, MockDownloader, MockFetcher},
    Config, PosterCache, RegionError, SyncError, SyncRunner,
};

const PAGE_URL: &str = "https://m.imdb.com/name/nm0000001/";

/// Test helper owning a temporary site and the mocks.
struct TestSite {
    fetcher: MockFetcher,
    downloader: MockDownloader,
    config: Config,
    _dir: TempDir,
}

impl TestSite {
    async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = Config::default();
        config.source.name_id = "nm0000001".to_string();
        config.credits.priority = vec!["tt100".to_string(), "tt200".to_string()];
        config.posters.dir = dir.path().join("assets").join("posters");
        config.document.path = dir.path().join("index.html");

        std::fs::write(&config.document.path, fixtures::host_document())
            .expect("Failed to write host document");

        Self {
            fetcher: MockFetcher::new(),
            downloader: MockDownloader::new(),
            config,
            _dir: dir,
        }
    }

    async fn serve(&self, credits: Vec<serde_json::Value>) {
        let page = fixtures::name_page(&fixtures::filmography(credits));
        self.fetcher.set_response(PAGE_URL, page).await;
    }

    fn runner(&self) -> SyncRunner<MockFetcher, MockDownloader> {
        SyncRunner::new(
            self.config.clone(),
            self.fetcher.clone(),
            self.downloader.clone(),
        )
        .expect("Failed to build runner")
    }

    fn cache(&self) -> PosterCache {
        PosterCache::from_config(&self.config.posters)
    }

    fn document_path(&self) -> PathBuf {
        self.config.document.path.clone()
    }

    fn document(&self) -> String {
        std::fs::read_to_string(self.document_path()).expect("Failed to read document")
    }

    async fn cached_ids(&self) -> BTreeSet<String> {
        self.cache().list_ids().await.expect("Failed to list cache")
    }
}

fn ids(set: &[&str]) -> BTreeSet<String> {
    set.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_full_sync_ranks_renders_and_fetches() {
    let site = TestSite::new().await;
    site.serve(vec![
        fixtures::cinematography_credit("tt300", "Three", 2020, "https://img/3._V1_UX67_.jpg"),
        fixtures::cinematography_credit("tt400", "Four", 2019, "https://img/4.jpg"),
        fixtures::cinematography_credit("tt200", "Two", 2001, "https://img/2.jpg"),
        fixtures::credit_node("Director of Photography", "tt100", Some("One"), None, None, None),
        fixtures::credit_node("Director", "tt500", Some("Not mine"), Some(2024), None, None),
    ])
    .await;

    let report = site.runner().run().await.unwrap();

    let order: Vec<_> = report.credits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["tt100", "tt200", "tt300", "tt400"]);
    assert!(report.document_written);

    let reconcile = report.reconcile.unwrap();
    assert_eq!(reconcile.fetched, vec!["tt200", "tt300", "tt400"]);
    assert_eq!(reconcile.without_poster, 1);
    assert_eq!(site.cached_ids().await, ids(&["tt200", "tt300", "tt400"]));

    let downloads = site.downloader.recorded_downloads().await;
    assert!(downloads
        .iter()
        .any(|d| d.url == "https://img/3._V1_QL75_UX500_.jpg"));

    let doc = site.document();
    let one = doc.find("<h3 class=\"project-name\">One</h3>").unwrap();
    let two = doc.find("<h3 class=\"project-name\">Two</h3>").unwrap();
    let three = doc.find("<h3 class=\"project-name\">Three</h3>").unwrap();
    let four = doc.find("<h3 class=\"project-name\">Four</h3>").unwrap();
    assert!(one < two && two < three && three < four);
    assert!(!doc.contains("Not mine"));
    assert!(doc.contains("<footer>&copy; hand written</footer>"));
}

#[tokio::test]
async fn test_duplicate_credits_merge() {
    let site = TestSite::new().await;
    site.serve(vec![
        fixtures::credit_node("Cinematographer", "tt300", Some("First Name"), None, None, None),
        fixtures::credit_node(
            "Cinematographer",
            "tt300",
            Some("Second Name"),
            Some(2022),
            Some("TV Mini Series"),
            Some("https://img/3.jpg"),
        ),
    ])
    .await;

    let report = site.runner().run().await.unwrap();

    assert_eq!(report.credits.len(), 1);
    let credit = &report.credits[0];
    assert_eq!(credit.name, "First Name");
    assert_eq!(credit.year, Some(2022));
    assert_eq!(credit.type_label, "TV Mini Series");
    assert_eq!(credit.type_key, "tv_mini_series");
    assert_eq!(credit.poster_url.as_deref(), Some("https://img/3.jpg"));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let site = TestSite::new().await;
    site.serve(vec![
        fixtures::cinematography_credit("tt300", "Three", 2020, "https://img/3.jpg"),
        fixtures::cinematography_credit("tt400", "Four & <More>", 2019, "https://img/4.jpg"),
    ])
    .await;

    let first = site.runner().run().await.unwrap();
    assert!(first.document_written);
    let doc_after_first = site.document();
    let downloads_after_first = site.downloader.download_count().await;

    let second = site.runner().run().await.unwrap();
    assert!(!second.document_changed);
    assert!(!second.document_written);
    assert!(second.plan.is_noop());
    assert_eq!(site.document(), doc_after_first);
    assert_eq!(site.downloader.download_count().await, downloads_after_first);
    assert!(doc_after_first.contains("Four &amp; &lt;More&gt;"));
}

#[tokio::test]
async fn test_cache_converges_to_credit_set() {
    let site = TestSite::new().await;
    let cache = site.cache();
    cache.ensure_dir().await.unwrap();
    std::fs::write(cache.path_for("tt900"), b"x").unwrap();
    std::fs::write(cache.path_for("tt300"), b"y").unwrap();

    site.serve(vec![
        fixtures::cinematography_credit("tt300", "Y", 2020, "https://img/y.jpg"),
        fixtures::cinematography_credit("tt400", "Z", 2021, "https://img/z.jpg"),
    ])
    .await;

    let report = site.runner().run().await.unwrap();
    let reconcile = report.reconcile.unwrap();

    assert_eq!(reconcile.removed, vec!["tt900"]);
    assert_eq!(reconcile.fetched, vec!["tt400"]);
    assert_eq!(site.cached_ids().await, ids(&["tt300", "tt400"]));
    assert_eq!(std::fs::read(cache.path_for("tt300")).unwrap(), b"y");
}

#[tokio::test]
async fn test_poster_failure_does_not_abort_run() {
    let site = TestSite::new().await;
    site.downloader.fail_url("https://img/bad.jpg", 500).await;
    site.serve(vec![
        fixtures::cinematography_credit("tt300", "Bad", 2021, "https://img/bad.jpg"),
        fixtures::cinematography_credit("tt400", "Good", 2020, "https://img/good.jpg"),
    ])
    .await;

    let report = site.runner().run().await.unwrap();
    let reconcile = report.reconcile.unwrap();

    assert_eq!(reconcile.fetch_failures.len(), 1);
    assert_eq!(reconcile.fetch_failures[0].id, "tt300");
    assert_eq!(reconcile.fetched, vec!["tt400"]);
    assert!(report.document_written);
    assert!(site.document().contains("Bad"));

    // The next run retries the missing poster only
    let second = site.runner().run().await.unwrap();
    assert_eq!(second.plan.to_fetch.len(), 1);
    assert_eq!(second.plan.to_fetch[0].id, "tt300");
}

#[tokio::test]
async fn test_no_matching_credits_renders_placeholder() {
    let site = TestSite::new().await;
    let cache = site.cache();
    cache.ensure_dir().await.unwrap();
    std::fs::write(cache.path_for("tt900"), b"x").unwrap();
    site.serve(vec![fixtures::credit_node(
        "Editor", "tt300", Some("Cut"), Some(2020), None, None,
    )])
    .await;

    let report = site.runner().run().await.unwrap();

    assert!(report.credits.is_empty());
    assert!(site.cached_ids().await.is_empty());
    let doc = site.document();
    assert!(doc.contains(
        "<!-- AUTO-IMDB-START -->\n\
         <p class=\"project-empty\" data-i18n=\"no_credits\">No cinematographer credits found on IMDb.</p>\n\
         <!-- AUTO-IMDB-END -->"
    ));
}

#[tokio::test]
async fn test_missing_start_marker_aborts_without_side_effects() {
    let site = TestSite::new().await;
    let broken = fixtures::host_document().replace("<!-- AUTO-IMDB-START -->\n", "");
    std::fs::write(site.document_path(), &broken).unwrap();
    site.serve(vec![fixtures::cinematography_credit(
        "tt300",
        "Three",
        2020,
        "https://img/3.jpg",
    )])
    .await;

    let err = site.runner().run().await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Region(RegionError::MarkerNotFound { .. })
    ));
    assert_eq!(site.document(), broken);
    assert_eq!(site.downloader.download_count().await, 0);
    assert!(!site.cache().dir().exists());
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let mut site = TestSite::new().await;
    site.config.sync.dry_run = true;
    site.serve(vec![fixtures::cinematography_credit(
        "tt300",
        "Three",
        2020,
        "https://img/3.jpg",
    )])
    .await;

    let report = site.runner().run().await.unwrap();

    assert!(report.reconcile.is_none());
    assert!(report.document_changed);
    assert!(!report.document_written);
    assert_eq!(report.plan.to_fetch.len(), 1);
    assert_eq!(site.document(), fixtures::host_document());
    assert_eq!(site.downloader.download_count().await, 0);
}

#[tokio::test]
async fn test_sync_value_accepts_any_nesting() {
    let site = TestSite::new().await;
    let tree = json!({
        "a": [[{ "b": fixtures::cinematography_credit("tt300", "Deep", 2018, "https://img/d.jpg") }]],
        "c": "scalar",
        "d": null
    });

    let report = site.runner().sync_value(&tree).await.unwrap();

    assert_eq!(report.credits.len(), 1);
    assert_eq!(report.credits[0].name, "Deep");
    assert_eq!(
        site.fetcher.recorded_requests().await,
        Vec::<String>::new()
    );
}
