//! Brings the poster cache in line with the ranked credit list.

use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

use super::cache::{PosterCache, PosterCacheError};
use super::types::{PosterFailure, PosterFetch, ReconcileReport, ReconciliationPlan};
use crate::credits::CreditRecord;
use crate::fetcher::Downloader;

/// Compute what has to change in the cache. Pure; touches nothing.
///
/// Credited titles with a poster URL and no cached file are fetched, cached
/// files for titles not in `ranked` are removed. A credited title is never
/// scheduled for removal, even if it has no poster URL any more.
pub fn plan_reconciliation(
    ranked: &[CreditRecord],
    cached: &BTreeSet<String>,
) -> ReconciliationPlan {
    let mut plan = ReconciliationPlan::default();
    let keep: HashSet<&str> = ranked.iter().map(|c| c.id.as_str()).collect();

    for credit in ranked {
        match &credit.poster_url {
            Some(url) if !cached.contains(&credit.id) => plan.to_fetch.push(PosterFetch {
                id: credit.id.clone(),
                name: credit.name.clone(),
                url: url.clone(),
            }),
            Some(_) => {}
            None => plan.without_poster.push(credit.id.clone()),
        }
    }

    plan.to_remove = cached
        .iter()
        .filter(|id| !keep.contains(id.as_str()))
        .cloned()
        .collect();

    plan
}

/// Applies reconciliation plans through a [`Downloader`].
pub struct PosterReconciler<D: Downloader> {
    cache: PosterCache,
    downloader: D,
}

impl<D: Downloader> PosterReconciler<D> {
    pub fn new(cache: PosterCache, downloader: D) -> Self {
        Self { cache, downloader }
    }

    pub fn cache(&self) -> &PosterCache {
        &self.cache
    }

    /// Plan against the current directory listing.
    pub async fn plan(&self, ranked: &[CreditRecord]) -> Result<ReconciliationPlan, PosterCacheError> {
        let cached = self.cache.list_ids().await?;
        Ok(plan_reconciliation(ranked, &cached))
    }

    /// Plan and apply in one go.
    pub async fn reconcile(
        &self,
        ranked: &[CreditRecord],
    ) -> Result<ReconcileReport, PosterCacheError> {
        self.cache.ensure_dir().await?;
        let plan = self.plan(ranked).await?;
        Ok(self.apply(&plan).await)
    }

    /// Execute `plan`: downloads one at a time in plan order, then deletions.
    ///
    /// A failure on one record is logged, recorded in the report, and does
    /// not stop the others. Deletions only run after every download attempt.
    pub async fn apply(&self, plan: &ReconciliationPlan) -> ReconcileReport {
        let mut report = ReconcileReport {
            without_poster: plan.without_poster.len(),
            ..ReconcileReport::default()
        };

        for fetch in &plan.to_fetch {
            let dest = self.cache.path_for(&fetch.id);
            info!("Downloading poster {} ({})", fetch.id, fetch.name);
            match self.downloader.download(&fetch.url, &dest).await {
                Ok(bytes) => {
                    debug!("Poster {} stored ({} bytes)", fetch.id, bytes);
                    report.fetched.push(fetch.id.clone());
                }
                Err(e) => {
                    warn!("Poster download failed for {}: {}", fetch.id, e);
                    report.fetch_failures.push(PosterFailure {
                        id: fetch.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for id in &plan.to_remove {
            match self.cache.remove(id).await {
                Ok(()) => {
                    info!("Removed stale poster: {}", self.cache.file_name(id));
                    report.removed.push(id.clone());
                }
                Err(e) => {
                    warn!("Failed to remove stale poster {}: {}", id, e);
                    report.remove_failures.push(PosterFailure {
                        id: id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
