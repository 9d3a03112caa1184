pub mod config;
pub mod credits;
pub mod fetcher;
pub mod fs_util;
pub mod page;
pub mod posters;
pub mod region;
pub mod sync;
pub mod testing;
pub mod walker;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
    CreditsConfig, DocumentConfig, HttpConfig, PosterConfig, SourceConfig, SyncConfig,
};
pub use credits::{CreditExtractor, CreditMap, CreditRecord, Ranker};
pub use fetcher::{Downloader, FetchError, Fetcher, HttpClient};
pub use page::{extract_embedded_json, name_page_url, PageError};
pub use posters::{
    plan_reconciliation, PosterCache, PosterCacheError, PosterReconciler, ReconcileReport,
    ReconciliationPlan,
};
pub use region::{DocumentError, HostDocument, RegionAnchor, RegionError, RegionRenderer};
pub use sync::{SyncError, SyncReport, SyncRunner};
pub use walker::walk;
