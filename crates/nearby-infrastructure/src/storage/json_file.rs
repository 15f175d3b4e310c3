//! Best-effort JSON file reader.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::paths::{NearbyPaths, StorageLocation};

/// Reads `file_name` from `location` and decodes it as `T`.
///
/// Every failure (unresolvable directory, missing file, unreadable file,
/// malformed JSON, schema mismatch) yields `None`. The cause is only logged
/// at debug level.
pub async fn read_json_file<T>(
    paths: &NearbyPaths,
    location: StorageLocation,
    file_name: &str,
) -> Option<T>
where
    T: DeserializeOwned,
{
    let directory = match paths.directory(location) {
        Ok(directory) => directory,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", file_name, e);
            return None;
        }
    };

    read_json_path(&directory.join(file_name)).await
}

async fn read_json_path<T>(path: &Path) -> Option<T>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Could not read {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Could not decode {:?}: {}", path, e);
            None
        }
    }
}
