//! Directory-backed poster cache.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::config::PosterConfig;

/// Errors that make the cache unusable for a whole run.
#[derive(Debug, Error)]
pub enum PosterCacheError {
    #[error("Failed to create poster directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list poster directory: {path}")]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat directory of `<id>.<extension>` files.
#[derive(Debug, Clone)]
pub struct PosterCache {
    dir: PathBuf,
    extension: String,
}

impl PosterCache {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &PosterConfig) -> Self {
        Self::new(config.dir.clone(), config.extension.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name of the poster for `id`.
    pub fn file_name(&self, id: &str) -> String {
        format!("{}.{}", id, self.extension)
    }

    /// Full path of the poster for `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(self.file_name(id))
    }

    /// Id encoded in a cache file name, if the name carries this cache's extension.
    fn id_from_file_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|id| !id.is_empty())
    }

    /// Create the cache directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), PosterCacheError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PosterCacheError::DirectoryCreationFailed {
                path: self.dir.clone(),
                source,
            })
    }

    /// Ids of every cached poster. A missing directory is an empty cache.
    ///
    /// Only regular files with the cache extension count; temporary files
    /// from interrupted downloads and anything else are ignored.
    pub async fn list_ids(&self) -> Result<BTreeSet<String>, PosterCacheError> {
        let list_failed = |source: std::io::Error| PosterCacheError::ListFailed {
            path: self.dir.clone(),
            source,
        };

        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(list_failed(e)),
        };

        let mut ids = BTreeSet::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
            let file_type = entry.file_type().await.map_err(list_failed)?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(id) = self.id_from_file_name(name) {
                ids.insert(id.to_string());
            }
        }
        Ok(ids)
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, id: &str) -> bool {
        fs::metadata(self.path_for(id))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Delete the poster for `id`.
    pub async fn remove(&self, id: &str) -> std::io::Result<()> {
        fs::remove_file(self.path_for(id)).await
    }
}
