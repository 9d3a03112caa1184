//! Credit record types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display name used when a work has no title text.
pub const UNTITLED: &str = "Untitled";

/// Type label used when no label rule matches.
pub const FALLBACK_TYPE_LABEL: &str = "Title";

/// Type key used when no key rule matches.
pub const FALLBACK_TYPE_KEY: &str = "title";

/// Deduplicated credits keyed by title id.
pub type CreditMap = HashMap<String, CreditRecord>;

/// A single credited work, normalized from the raw tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    /// Title id (e.g. `tt1234567`), the merge key.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Release year, if known.
    pub year: Option<i32>,
    /// Human-readable category ("Feature Film", "TV Series", ...).
    pub type_label: String,
    /// Machine-readable category slug ("feature_film", "tv_series", ...).
    pub type_key: String,
    /// Normalized poster image URL.
    pub poster_url: Option<String>,
    /// Public page of the title.
    pub permalink: String,
}

impl CreditRecord {
    /// Fold a later-seen record for the same id into this one.
    ///
    /// Populated fields are never overwritten. The only replacement allowed is
    /// a fallback type label/key giving way to a real one.
    pub fn merge_from(&mut self, candidate: CreditRecord) {
        debug_assert_eq!(self.id, candidate.id);

        if self.poster_url.is_none() {
            self.poster_url = candidate.poster_url;
        }
        if self.year.is_none() {
            self.year = candidate.year;
        }
        if self.type_label == FALLBACK_TYPE_LABEL && candidate.type_label != FALLBACK_TYPE_LABEL {
            self.type_label = candidate.type_label;
        }
        if self.type_key == FALLBACK_TYPE_KEY && candidate.type_key != FALLBACK_TYPE_KEY {
            self.type_key = candidate.type_key;
        }
    }
}
