//! Credit extraction, normalization and ranking.
//!
//! The extractor walks an arbitrary JSON tree (see [`crate::walker`]) and
//! collects every work credited under one of the configured roles into a
//! [`CreditMap`] keyed by title id. The [`Ranker`] then turns that map into
//! the final, stably ordered list.

mod extractor;
mod normalize;
mod ranker;
mod types;

pub use extractor::CreditExtractor;
pub use normalize::{
    is_valid_id, normalize_poster_url, permalink, type_key, type_label, TypeRule, TYPE_KEY_RULES,
    TYPE_LABEL_RULES,
};
pub use ranker::Ranker;
pub use types::{CreditMap, CreditRecord, FALLBACK_TYPE_KEY, FALLBACK_TYPE_LABEL, UNTITLED};
