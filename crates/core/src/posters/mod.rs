//! Poster cache reconciliation.
//!
//! The cache directory holds one image per credited title, named after the
//! title id. Each run compares the ranked credits with the directory listing:
//! missing posters are downloaded, files for titles that are no longer
//! credited are deleted. Nothing else is persisted between runs.
//!
//! # Example
//!
//! ```ignore
//! use reelsync_core::posters::{PosterCache, PosterReconciler};
//!
//! let cache = PosterCache::new("assets/posters", "jpg");
//! let reconciler = PosterReconciler::new(cache, http_client);
//!
//! let report = reconciler.reconcile(&ranked).await?;
//! println!("fetched {}, removed {}", report.fetched.len(), report.removed.len());
//! ```

mod cache;
mod reconciler;
mod types;

pub use cache::{PosterCache, PosterCacheError};
pub use reconciler::{plan_reconciliation, PosterReconciler};
pub use types::{PosterFailure, PosterFetch, ReconcileReport, ReconciliationPlan};
