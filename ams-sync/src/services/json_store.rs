//! JSON document persistence shared by the file-backed services
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write never leaves a truncated roster behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::SyncResult;

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "document".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read and parse a JSON document
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> SyncResult<T> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize and atomically replace a JSON document
pub async fn save_json_atomic<T: Serialize>(path: &Path, value: &T) -> SyncResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}
