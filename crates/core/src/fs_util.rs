//! Small filesystem helpers shared by the downloader and the document store.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Suffix appended to a file name while its new content is being written.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Sibling path used as the write target before renaming onto `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

/// Write `contents` to `path` via a temporary sibling and a rename.
///
/// On failure the temporary file is removed and `path` is left as it was.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path_for(path);
    if let Err(e) = fs::write(&tmp, contents).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}
