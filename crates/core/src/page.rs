//! Locating the filmography JSON embedded in the fetched name page.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde_json::Value;
use thiserror::Error;

static NEXT_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("embedded data pattern is valid")
});

/// Errors that can occur when reading the name page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Embedded __NEXT_DATA__ script not found; the page format may have changed")]
    EmbeddedDataNotFound,

    #[error("Embedded __NEXT_DATA__ is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Name page URL for `name_id`, from a template containing `{name_id}`.
pub fn name_page_url(template: &str, name_id: &str) -> String {
    template.replace("{name_id}", name_id)
}

/// Parse the JSON document embedded in the page's `__NEXT_DATA__` script.
pub fn extract_embedded_json(html: &str) -> Result<Value, PageError> {
    let body = NEXT_DATA
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or(PageError::EmbeddedDataNotFound)?;
    Ok(serde_json::from_str(body.as_str())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_page_url() {
        assert_eq!(
            name_page_url("https://m.imdb.com/name/{name_id}/", "nm10457842"),
            "https://m.imdb.com/name/nm10457842/"
        );
    }

    #[test]
    fn test_extract_embedded_json() {
        let html = r#"<html><head>
<script src="/app.js"></script>
<script id="__NEXT_DATA__" type="application/json">{"props":
  {"pageProps": {"id": "nm1"}}}</script>
</head><body></body></html>"#;
        let value = extract_embedded_json(html).unwrap();
        assert_eq!(value["props"]["pageProps"]["id"], "nm1");
    }

    #[test]
    fn test_first_closing_script_ends_payload() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">[1,2]</script><script>var x = 1;</script>"#;
        let value = extract_embedded_json(html).unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn test_missing_script() {
        let err = extract_embedded_json("<html><body>Blocked</body></html>").unwrap_err();
        assert!(matches!(err, PageError::EmbeddedDataNotFound));
    }

    #[test]
    fn test_invalid_json() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">{not json</script>"#;
        let err = extract_embedded_json(html).unwrap_err();
        assert!(matches!(err, PageError::InvalidJson(_)));
    }
}
