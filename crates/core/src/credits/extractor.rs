//! Role-filtered credit extraction over the raw filmography tree.

use serde_json::{Map, Value};
use tracing::debug;

use super::normalize::{is_valid_id, normalize_poster_url, permalink, type_key, type_label};
use super::types::{CreditMap, CreditRecord, UNTITLED};
use crate::config::Config;
use crate::walker::walk;

/// Follow `path` through nested objects. Any missing or non-object step yields `None`.
fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Non-empty string at `path`.
fn text_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Extracts works credited under a target role from an arbitrary JSON tree.
#[derive(Debug, Clone)]
pub struct CreditExtractor {
    /// Lowercased role phrasings.
    roles: Vec<String>,
    permalink_base: String,
    size_token: String,
}

impl CreditExtractor {
    /// Creates an extractor accepting any of `roles` (case-insensitive).
    pub fn new(
        roles: &[String],
        permalink_base: impl Into<String>,
        size_token: impl Into<String>,
    ) -> Self {
        Self {
            roles: roles
                .iter()
                .map(|r| r.trim().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect(),
            permalink_base: permalink_base.into(),
            size_token: size_token.into(),
        }
    }

    /// Creates an extractor from the credits and poster sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.credits.roles,
            config.credits.permalink_base.clone(),
            config.posters.size_token.clone(),
        )
    }

    /// Walk `root` and collect one record per credited title id.
    ///
    /// When the same id is reached more than once, later nodes only fill gaps
    /// in the first record (see [`CreditRecord::merge_from`]).
    pub fn extract(&self, root: &Value) -> CreditMap {
        let mut credits = CreditMap::new();
        walk(root, &mut |node| {
            let Some(candidate) = self.candidate(node) else {
                return;
            };
            match credits.get_mut(&candidate.id) {
                Some(existing) => {
                    debug!("Merging duplicate credit {}", candidate.id);
                    existing.merge_from(candidate);
                }
                None => {
                    debug!("Found credit {} ({})", candidate.id, candidate.name);
                    credits.insert(candidate.id.clone(), candidate);
                }
            }
        });
        credits
    }

    /// Builds a record if `node` is a role-credited work.
    fn candidate(&self, node: &Map<String, Value>) -> Option<CreditRecord> {
        let edges = node
            .get("creditedRoles")
            .and_then(|roles| roles.get("edges"))
            .and_then(Value::as_array)
            .filter(|edges| !edges.is_empty())?;
        let title = node.get("title").filter(|t| t.is_object())?;

        let has_role = edges
            .iter()
            .filter_map(|edge| text_at(edge, &["node", "category", "text"]))
            .any(|category| self.matches_role(category));
        if !has_role {
            return None;
        }

        let id = text_at(title, &["id"]).filter(|id| is_valid_id(id))?;
        let raw_type = text_at(title, &["titleType", "text"]).unwrap_or_default();

        Some(CreditRecord {
            id: id.to_string(),
            name: text_at(title, &["titleText", "text"])
                .unwrap_or(UNTITLED)
                .to_string(),
            year: lookup(title, &["releaseYear", "year"])
                .and_then(Value::as_i64)
                .and_then(|y| i32::try_from(y).ok()),
            type_label: type_label(raw_type),
            type_key: type_key(raw_type),
            poster_url: text_at(title, &["primaryImage", "url"])
                .map(|url| normalize_poster_url(url, &self.size_token)),
            permalink: permalink(&self.permalink_base, id),
        })
    }

    fn matches_role(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.roles.iter().any(|role| category.contains(role.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extractor() -> CreditExtractor {
        CreditExtractor::new(
            &["cinematographer".to_string(), "director of photography".to_string()],
            "https://www.imdb.com/title/",
            "QL75_UX500_",
        )
    }

    fn credit_node(category: &str, title: Value) -> Value {
        json!({
            "creditedRoles": { "edges": [ { "node": { "category": { "text": category } } } ] },
            "title": title
        })
    }

    fn full_title(id: &str, name: &str, year: i64, kind: &str, url: &str) -> Value {
        json!({
            "id": id,
            "titleText": { "text": name },
            "releaseYear": { "year": year },
            "titleType": { "text": kind },
            "primaryImage": { "url": url }
        })
    }

    #[test]
    fn test_extracts_complete_record() {
        let tree = json!({
            "props": { "pageProps": { "credits": [
                credit_node(
                    "Cinematographer",
                    full_title("tt123", "Entropy", 2024, "Short", "https://img/p._V1_UX67_.jpg"),
                )
            ] } }
        });

        let credits = extractor().extract(&tree);
        assert_eq!(credits.len(), 1);
        let record = &credits["tt123"];
        assert_eq!(record.name, "Entropy");
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.type_label, "Short Film");
        assert_eq!(record.type_key, "short_film");
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://img/p._V1_QL75_UX500_.jpg")
        );
        assert_eq!(record.permalink, "https://www.imdb.com/title/tt123/");
    }

    #[test]
    fn test_role_synonym_case_insensitive() {
        let tree = json!([
            credit_node("DIRECTOR OF PHOTOGRAPHY", json!({ "id": "tt1" })),
            credit_node("Additional Cinematographer", json!({ "id": "tt2" })),
        ]);
        let credits = extractor().extract(&tree);
        assert!(credits.contains_key("tt1"));
        assert!(credits.contains_key("tt2"));
    }

    #[test]
    fn test_other_roles_skipped() {
        let tree = json!([
            credit_node("Director", json!({ "id": "tt1" })),
            credit_node("Editor", json!({ "id": "tt2" })),
        ]);
        assert!(extractor().extract(&tree).is_empty());
    }

    #[test]
    fn test_any_edge_may_carry_the_role() {
        let tree = json!({
            "creditedRoles": { "edges": [
                { "node": { "category": { "text": "Editor" } } },
                { "node": {} },
                { "node": { "category": { "text": "Cinematographer" } } }
            ] },
            "title": { "id": "tt7" }
        });
        assert!(extractor().extract(&tree).contains_key("tt7"));
    }

    #[test]
    fn test_invalid_ids_discarded() {
        let tree = json!([
            credit_node("Cinematographer", json!({ "id": "nm10457842" })),
            credit_node("Cinematographer", json!({ "id": "tt12x" })),
            credit_node("Cinematographer", json!({ "id": 123 })),
            credit_node("Cinematographer", json!({})),
        ]);
        assert!(extractor().extract(&tree).is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let tree = credit_node("Cinematographer", json!({ "id": "tt5", "titleText": {} }));
        let credits = extractor().extract(&tree);
        let record = &credits["tt5"];
        assert_eq!(record.name, UNTITLED);
        assert_eq!(record.year, None);
        assert_eq!(record.type_label, "Title");
        assert_eq!(record.type_key, "title");
        assert_eq!(record.poster_url, None);
    }

    #[test]
    fn test_malformed_structure_tolerated() {
        let tree = json!([
            { "creditedRoles": null, "title": { "id": "tt1" } },
            { "creditedRoles": { "edges": "nope" }, "title": { "id": "tt2" } },
            { "creditedRoles": { "edges": [] }, "title": { "id": "tt3" } },
            { "creditedRoles": { "edges": [null, 4, { "node": { "category": "flat" } }] }, "title": { "id": "tt4" } },
            { "creditedRoles": { "edges": [ { "node": { "category": { "text": "Cinematographer" } } } ] }, "title": "tt5" },
            credit_node("Cinematographer", json!({
                "id": "tt6",
                "titleText": "flat",
                "releaseYear": { "year": "2020" },
                "primaryImage": { "url": "" }
            })),
        ]);
        let credits = extractor().extract(&tree);
        assert_eq!(credits.len(), 1);
        let record = &credits["tt6"];
        assert_eq!(record.name, UNTITLED);
        assert_eq!(record.year, None);
        assert_eq!(record.poster_url, None);
    }

    #[test]
    fn test_duplicates_merge_into_one_record() {
        let tree = json!({
            "a": credit_node("Cinematographer", json!({ "id": "tt9", "titleText": { "text": "Lostland" } })),
            "b": credit_node("Cinematographer", full_title("tt9", "Other Name", 2023, "Movie", "https://img/x.jpg")),
        });
        let credits = extractor().extract(&tree);
        assert_eq!(credits.len(), 1);
        let record = &credits["tt9"];
        // "a" is walked before "b"
        assert_eq!(record.name, "Lostland");
        assert_eq!(record.year, Some(2023));
        assert_eq!(record.type_label, "Feature Film");
        assert_eq!(record.poster_url.as_deref(), Some("https://img/x.jpg"));
    }

    #[test]
    fn test_duplicate_first_populated_year_wins() {
        let tree = json!({
            "a": credit_node("Cinematographer", full_title("tt9", "X", 2019, "Movie", "https://img/a.jpg")),
            "b": credit_node("Cinematographer", full_title("tt9", "X", 2020, "TV Series", "https://img/b.jpg")),
        });
        let record = &extractor().extract(&tree)["tt9"];
        assert_eq!(record.year, Some(2019));
        assert_eq!(record.type_key, "feature_film");
        assert_eq!(record.poster_url.as_deref(), Some("https://img/a.jpg"));
    }

    #[test]
    fn test_first_seen_follows_document_order() {
        // Keys deliberately out of alphabetical order
        let page = r#"{
            "zeta": {
                "creditedRoles": { "edges": [ { "node": { "category": { "text": "Cinematographer" } } } ] },
                "title": { "id": "tt9", "titleText": { "text": "Shown First" } }
            },
            "alpha": {
                "creditedRoles": { "edges": [ { "node": { "category": { "text": "Cinematographer" } } } ] },
                "title": { "id": "tt9", "titleText": { "text": "Shown Second" }, "releaseYear": { "year": 2021 } }
            }
        }"#;
        let tree: Value = serde_json::from_str(page).unwrap();

        let record = &extractor().extract(&tree)["tt9"];
        assert_eq!(record.name, "Shown First");
        assert_eq!(record.year, Some(2021));
    }

    #[test]
    fn test_credits_nested_inside_credit_nodes() {
        let tree = json!({
            "creditedRoles": { "edges": [ { "node": { "category": { "text": "Cinematographer" } } } ] },
            "title": { "id": "tt1", "episodes": [
                credit_node("Cinematographer", json!({ "id": "tt2" }))
            ] }
        });
        let credits = extractor().extract(&tree);
        assert_eq!(credits.len(), 2);
    }

    #[test]
    fn test_custom_role() {
        let extractor = CreditExtractor::new(&["Editor".to_string()], "https://x/", "T_");
        let tree = json!([
            credit_node("Film Editor", json!({ "id": "tt1" })),
            credit_node("Cinematographer", json!({ "id": "tt2" })),
        ]);
        let credits = extractor.extract(&tree);
        assert_eq!(credits.len(), 1);
        assert_eq!(credits["tt1"].permalink, "https://x/tt1/");
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let extractor = CreditExtractor::from_config(&Config::default());
        let tree = credit_node("Director of Photography", json!({ "id": "tt1" }));
        assert_eq!(extractor.extract(&tree).len(), 1);
    }
}
