//! One end-to-end sync run.
//!
//! Order of operations matters for the failure model:
//! 1. fetch the name page and extract + rank the credits;
//! 2. read the host document and compute its replacement, so structural
//!    problems abort before any artifact is touched;
//! 3. reconcile the poster cache, isolating per-record failures;
//! 4. write the host document if its content changed.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::credits::{CreditExtractor, CreditRecord, Ranker};
use crate::fetcher::{Downloader, FetchError, Fetcher, HttpClient};
use crate::page::{extract_embedded_json, name_page_url, PageError};
use crate::posters::{
    PosterCache, PosterCacheError, PosterReconciler, ReconcileReport, ReconciliationPlan,
};
use crate::region::{DocumentError, HostDocument, RegionAnchor, RegionError, RegionRenderer};

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    PosterCache(#[from] PosterCacheError),
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Ranked credits the run was based on.
    pub credits: Vec<CreditRecord>,
    /// Poster cache changes computed for this run.
    pub plan: ReconciliationPlan,
    /// Result of applying the plan; `None` on a dry run.
    pub reconcile: Option<ReconcileReport>,
    /// Whether the rendered region differs from the document's current one.
    pub document_changed: bool,
    /// Whether the document was rewritten.
    pub document_written: bool,
}

/// Drives fetch, extraction, ranking and both reconciliations.
pub struct SyncRunner<F: Fetcher, D: Downloader> {
    config: Config,
    fetcher: F,
    extractor: CreditExtractor,
    ranker: Ranker,
    renderer: RegionRenderer,
    anchor: RegionAnchor,
    document: HostDocument,
    posters: PosterReconciler<D>,
}

impl SyncRunner<HttpClient, HttpClient> {
    /// Runner backed by a real HTTP client for both collaborators.
    pub fn with_http_client(config: Config) -> Result<Self, SyncError> {
        let client = HttpClient::new(&config.http)?;
        Self::new(config, client.clone(), client)
    }
}

impl<F: Fetcher, D: Downloader> SyncRunner<F, D> {
    pub fn new(config: Config, fetcher: F, downloader: D) -> Result<Self, SyncError> {
        let anchor = RegionAnchor::from_config(&config.document)?;
        Ok(Self {
            extractor: CreditExtractor::from_config(&config),
            ranker: Ranker::new(&config.credits.priority),
            renderer: RegionRenderer::from_config(&config),
            document: HostDocument::new(config.document.path.clone()),
            posters: PosterReconciler::new(PosterCache::from_config(&config.posters), downloader),
            anchor,
            fetcher,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the configured name page and sync from it.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let url = name_page_url(&self.config.source.page_url, &self.config.source.name_id);
        info!("Fetching name page: {}", url);

        let html = self.fetcher.fetch_text(&url).await?;
        let tree = extract_embedded_json(&html)?;
        self.sync_value(&tree).await
    }

    /// Extract and rank the credits found in `tree`.
    pub fn collect_credits(&self, tree: &Value) -> Vec<CreditRecord> {
        let credits = self.extractor.extract(tree);
        self.ranker.rank(credits.into_values())
    }

    /// Sync both artifacts from an already-parsed filmography tree.
    pub async fn sync_value(&self, tree: &Value) -> Result<SyncReport, SyncError> {
        let credits = self.collect_credits(tree);
        info!(
            "Found {} unique titles credited as {}",
            credits.len(),
            self.config.credits.roles.join(" / ")
        );

        let current = self.document.read().await?;
        let updated = self
            .anchor
            .replace(&current, &self.renderer.render(&credits))?;
        let document_changed = updated != current;

        if self.config.sync.dry_run {
            let plan = self.posters.plan(&credits).await?;
            info!(
                "Dry run: would download {} posters, remove {}, {} document",
                plan.to_fetch.len(),
                plan.to_remove.len(),
                if document_changed { "update" } else { "keep" }
            );
            return Ok(SyncReport {
                credits,
                plan,
                reconcile: None,
                document_changed,
                document_written: false,
            });
        }

        self.posters.cache().ensure_dir().await?;
        let plan = self.posters.plan(&credits).await?;
        let reconcile = self.posters.apply(&plan).await;
        info!(
            "Posters: {} downloaded, {} failed, {} removed, {} without image",
            reconcile.fetched.len(),
            reconcile.fetch_failures.len(),
            reconcile.removed.len(),
            reconcile.without_poster
        );

        if document_changed {
            self.document.write(&updated).await?;
            info!("Updated {:?} with generated credits", self.document.path());
        } else {
            info!("{:?} already up to date", self.document.path());
        }

        Ok(SyncReport {
            credits,
            plan,
            reconcile: Some(reconcile),
            document_changed,
            document_written: document_changed,
        })
    }
}
