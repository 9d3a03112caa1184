//! Ordered pattern tables for title ids, type strings and poster URLs.
//!
//! Every table is evaluated first-match-wins. The label and key tables are
//! deliberately kept separate: the key table knows about music videos, the
//! label table does not, so a music video gets a real key and a fallback
//! label.

use once_cell::sync::Lazy;
use regex_lite::{NoExpand, Regex};

use super::types::{FALLBACK_TYPE_KEY, FALLBACK_TYPE_LABEL};

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tt\d+$").expect("id pattern is valid"));

/// The `._V1_..._.` size/quality segment of an image URL (shortest match).
static POSTER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\._V1_.*?\.").expect("poster token pattern is valid"));

/// One row of a type normalization table.
#[derive(Debug)]
pub struct TypeRule {
    pub pattern: Regex,
    pub value: &'static str,
}

impl TypeRule {
    fn new(pattern: &str, value: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("type rule pattern is valid"),
            value,
        }
    }
}

/// Raw type text to display label.
pub static TYPE_LABEL_RULES: Lazy<Vec<TypeRule>> = Lazy::new(|| {
    vec![
        TypeRule::new(r"tv mini[- ]series|mini-series", "TV Mini Series"),
        TypeRule::new(r"tv series", "TV Series"),
        TypeRule::new(r"tv special", "TV Special"),
        TypeRule::new(r"short", "Short Film"),
        TypeRule::new(r"movie", "Feature Film"),
        TypeRule::new(r"video game", "Video Game"),
    ]
});

/// Raw type text to machine key.
pub static TYPE_KEY_RULES: Lazy<Vec<TypeRule>> = Lazy::new(|| {
    vec![
        TypeRule::new(r"tv mini[- ]series|mini-series", "tv_mini_series"),
        TypeRule::new(r"tv series", "tv_series"),
        TypeRule::new(r"tv special", "tv_special"),
        TypeRule::new(r"short", "short_film"),
        TypeRule::new(r"movie", "feature_film"),
        TypeRule::new(r"music video", "music_video"),
        TypeRule::new(r"video game", "video_game"),
    ]
});

fn first_match(rules: &[TypeRule], raw: &str, fallback: &'static str) -> &'static str {
    if raw.is_empty() {
        return fallback;
    }
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(raw))
        .map(|rule| rule.value)
        .unwrap_or(fallback)
}

/// Whether `id` is a well-formed title id (`tt` followed by digits).
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

/// Human-readable category for a raw type string; "Title" when nothing matches.
pub fn type_label(raw: &str) -> String {
    first_match(&TYPE_LABEL_RULES, raw, FALLBACK_TYPE_LABEL).to_string()
}

/// Machine-readable category slug for a raw type string; "title" when nothing matches.
pub fn type_key(raw: &str) -> String {
    first_match(&TYPE_KEY_RULES, raw, FALLBACK_TYPE_KEY).to_string()
}

/// Rewrite the size/quality segment of a poster URL to `size_token`.
///
/// URLs without such a segment are returned unchanged.
pub fn normalize_poster_url(url: &str, size_token: &str) -> String {
    let replacement = format!("._V1_{}.", size_token);
    POSTER_TOKEN
        .replacen(url, 1, NoExpand(&replacement))
        .into_owned()
}

/// Public page of a title.
pub fn permalink(base: &str, id: &str) -> String {
    format!("{}{}/", base, id)
}
