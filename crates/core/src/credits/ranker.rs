//! Final ordering of the credit set.

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::types::CreditRecord;

/// Primary collation key for titles: accents stripped, lowercased.
///
/// `Ābols` and `abols` share a key, so they sort next to `apple` rather
/// than after every ASCII title.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        // Lowercase before uppercase on otherwise equal names
        .then_with(|| b.cmp(a))
}

/// Orders credits: pinned ids first (in list order), then newest year first,
/// then by name.
///
/// Names compare case- and accent-insensitively first. Unknown years sort
/// below every known year. Records that tie on all three keys are ordered by
/// id so the result never depends on map iteration order.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    priority: HashMap<String, usize>,
}

impl Ranker {
    /// Creates a ranker pinning `priority` ids in the given order.
    ///
    /// If an id is listed twice its first position counts.
    pub fn new(priority: &[String]) -> Self {
        let mut index = HashMap::with_capacity(priority.len());
        for (position, id) in priority.iter().enumerate() {
            index.entry(id.clone()).or_insert(position);
        }
        Self { priority: index }
    }

    /// Priority position of `id`, if pinned.
    pub fn priority_of(&self, id: &str) -> Option<usize> {
        self.priority.get(id).copied()
    }

    /// Total order between two records.
    pub fn compare(&self, a: &CreditRecord, b: &CreditRecord) -> Ordering {
        let by_priority = match (self.priority_of(&a.id), self.priority_of(&b.id)) {
            (Some(pa), Some(pb)) => pa.cmp(&pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        by_priority
            // None < Some(_), so reversing puts unknown years last
            .then_with(|| b.year.cmp(&a.year))
            .then_with(|| compare_names(&a.name, &b.name))
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Sort `credits` into the final list.
    pub fn rank<I>(&self, credits: I) -> Vec<CreditRecord>
    where
        I: IntoIterator<Item = CreditRecord>,
    {
        let mut ranked: Vec<CreditRecord> = credits.into_iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }
}
