//! Locating and replacing the generated region in the host document.

use regex_lite::{escape, Regex};

use super::error::RegionError;
use crate::config::DocumentConfig;

/// The marker pair plus the block structure that must enclose it.
#[derive(Debug, Clone)]
pub struct RegionAnchor {
    start_marker: String,
    end_marker: String,
    pattern: Regex,
    description: String,
}

impl RegionAnchor {
    /// Build an anchor from literal tokens.
    ///
    /// The region must look like `open... START ... END close...`, with
    /// optional whitespace between consecutive tokens.
    pub fn new(
        start_marker: &str,
        end_marker: &str,
        open: &[String],
        close: &[String],
    ) -> Result<Self, RegionError> {
        let join = |tokens: &[String]| {
            tokens
                .iter()
                .map(|t| escape(t))
                .collect::<Vec<_>>()
                .join(r"\s*")
        };
        let source = format!(
            r"(?s){}\s*({}.*?{})\s*{}",
            join(open),
            escape(start_marker),
            escape(end_marker),
            join(close)
        );
        let pattern = Regex::new(&source).map_err(|e| RegionError::InvalidAnchor(e.to_string()))?;

        Ok(Self {
            start_marker: start_marker.to_string(),
            end_marker: end_marker.to_string(),
            pattern,
            description: format!("{} ... {}", open.join(" "), close.join(" ")),
        })
    }

    pub fn from_config(config: &DocumentConfig) -> Result<Self, RegionError> {
        Self::new(
            &config.start_marker,
            &config.end_marker,
            &config.anchor_open,
            &config.anchor_close,
        )
    }

    fn require_single(document: &str, marker: &str) -> Result<(), RegionError> {
        match document.matches(marker).count() {
            1 => Ok(()),
            0 => Err(RegionError::MarkerNotFound {
                marker: marker.to_string(),
            }),
            count => Err(RegionError::DuplicateMarker {
                marker: marker.to_string(),
                count,
            }),
        }
    }

    /// Replace the region (markers included) with `fragment`.
    ///
    /// `fragment` is expected to start and end with the same markers, so the
    /// bytes before the start marker and after the end marker are preserved.
    pub fn replace(&self, document: &str, fragment: &str) -> Result<String, RegionError> {
        Self::require_single(document, &self.start_marker)?;
        Self::require_single(document, &self.end_marker)?;

        let region = self
            .pattern
            .captures(document)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| RegionError::AnchorNotFound {
                anchor: self.description.clone(),
            })?;

        let mut out = String::with_capacity(document.len() + fragment.len());
        out.push_str(&document[..region.start()]);
        out.push_str(fragment);
        out.push_str(&document[region.end()..]);
        Ok(out)
    }
}
