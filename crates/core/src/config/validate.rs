use super::{types::Config, ConfigError};
use crate::credits::is_valid_id;

/// Validate configuration
/// Currently validates:
/// - Source name id is set and the page URL template can take it
/// - At least one role is configured
/// - Priority ids are well-formed title ids
/// - Region markers are present and distinct
/// - Poster extension is usable as a file suffix
/// - HTTP timeout and redirect limit are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Source validation
    if config.source.name_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.name_id cannot be empty".to_string(),
        ));
    }
    if !config.source.page_url.contains("{name_id}") {
        return Err(ConfigError::ValidationError(
            "source.page_url must contain {name_id}".to_string(),
        ));
    }

    // Credits validation
    if config.credits.roles.iter().all(|r| r.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "credits.roles must name at least one role".to_string(),
        ));
    }
    if let Some(bad) = config.credits.priority.iter().find(|id| !is_valid_id(id)) {
        return Err(ConfigError::ValidationError(format!(
            "credits.priority contains malformed id '{}'",
            bad
        )));
    }

    // Poster validation
    let ext = &config.posters.extension;
    if ext.is_empty() || ext.contains('/') || ext.contains('\\') || ext.starts_with('.') {
        return Err(ConfigError::ValidationError(format!(
            "posters.extension '{}' is not a plain file extension",
            ext
        )));
    }

    // Document validation
    let doc = &config.document;
    if doc.start_marker.is_empty() || doc.end_marker.is_empty() {
        return Err(ConfigError::ValidationError(
            "document markers cannot be empty".to_string(),
        ));
    }
    if doc.start_marker == doc.end_marker {
        return Err(ConfigError::ValidationError(
            "document.start_marker and document.end_marker must differ".to_string(),
        ));
    }

    // HTTP validation
    if config.http.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "http.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.http.max_redirects == 0 {
        return Err(ConfigError::ValidationError(
            "http.max_redirects cannot be 0".to_string(),
        ));
    }

    Ok(())
}
