//! Host document store.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::error::DocumentError;
use crate::fs_util::write_atomic;

/// The hand-authored page that carries the generated region.
#[derive(Debug, Clone)]
pub struct HostDocument {
    path: PathBuf,
}

impl HostDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full text of the document.
    pub async fn read(&self) -> Result<String, DocumentError> {
        fs::read_to_string(&self.path)
            .await
            .map_err(|source| DocumentError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace the document's content atomically.
    pub async fn write(&self, contents: &str) -> Result<(), DocumentError> {
        write_atomic(&self.path, contents.as_bytes())
            .await
            .map_err(|source| DocumentError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!("Wrote {} bytes to {:?}", contents.len(), self.path);
        Ok(())
    }
}
