//! Error types for the region module.

use std::path::PathBuf;
use thiserror::Error;

/// The host document does not have the expected region structure.
#[derive(Debug, Error)]
pub enum RegionError {
    /// A marker is absent from the document.
    #[error("Region marker not found in host document: {marker}")]
    MarkerNotFound { marker: String },

    /// A marker appears more than once.
    #[error("Region marker appears {count} times in host document (expected once): {marker}")]
    DuplicateMarker { marker: String, count: usize },

    /// Markers exist but are not enclosed by the expected block.
    #[error("Could not find the generated region inside its anchor block ({anchor})")]
    AnchorNotFound { anchor: String },

    /// The anchor pattern could not be compiled.
    #[error("Invalid region anchor: {0}")]
    InvalidAnchor(String),
}

/// The host document could not be read or written.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read host document: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write host document: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
