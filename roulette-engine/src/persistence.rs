//! JSON snapshot persistence.
//!
//! The engine state is flushed as pretty-printed JSON. Writes go to a
//! sibling temp file first and are renamed into place, so a crash
//! mid-write never leaves a truncated snapshot behind.

use crate::error::{Result, ServiceError};
use roulette_core::Snapshot;
use std::path::Path;

/// Write a snapshot to `path` atomically.
pub async fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");

    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| ServiceError::Persistence {
            path: tmp.clone(),
            source: e,
        })?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| ServiceError::Persistence {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read a snapshot from `path`.
///
/// A missing file is a normal first start and returns `Ok(None)`.
pub async fn load(path: &Path) -> Result<Option<Snapshot>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ServiceError::Persistence {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}
