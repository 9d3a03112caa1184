//! Types for poster reconciliation.

use serde::Serialize;

/// A poster that has to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterFetch {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// What a run will do to the cache. Derived fresh every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    /// Missing posters, in ranked order.
    pub to_fetch: Vec<PosterFetch>,
    /// Cached ids no longer credited, sorted.
    pub to_remove: Vec<String>,
    /// Credited ids that have no poster URL.
    pub without_poster: Vec<String>,
}

impl ReconciliationPlan {
    /// True when applying the plan would neither download nor delete anything.
    pub fn is_noop(&self) -> bool {
        self.to_fetch.is_empty() && self.to_remove.is_empty()
    }
}

/// A per-record failure that was logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterFailure {
    pub id: String,
    pub reason: String,
}

/// Outcome of applying a [`ReconciliationPlan`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Ids whose poster was downloaded.
    pub fetched: Vec<String>,
    /// Downloads that failed.
    pub fetch_failures: Vec<PosterFailure>,
    /// Ids whose stale file was deleted.
    pub removed: Vec<String>,
    /// Deletions that failed.
    pub remove_failures: Vec<PosterFailure>,
    /// Credited ids skipped for lack of a poster URL.
    pub without_poster: usize,
}

impl ReconcileReport {
    /// Whether every planned operation succeeded.
    pub fn is_clean(&self) -> bool {
        self.fetch_failures.is_empty() && self.remove_failures.is_empty()
    }
}
