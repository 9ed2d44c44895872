use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::IndexError;

/// Metadata for one indexed chunk, aligned by position with the index rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Decision the chunk was cut from.
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl ChunkMetadata {
    pub fn new(id: i64, snippet: impl Into<String>) -> Self {
        Self {
            id,
            snippet: Some(snippet.into()),
        }
    }

    /// The snippet, or `""` when the chunk was stored without one.
    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or("")
    }
}

/// Reads the JSON array of chunk metadata at `path`.
pub fn load_chunk_metadata<P: AsRef<Path>>(path: P) -> Result<Vec<ChunkMetadata>, IndexError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|e| IndexError::io(path, e))?;
    let entries: Vec<ChunkMetadata> =
        serde_json::from_slice(&raw).map_err(|source| IndexError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), entries = entries.len(), "Loaded chunk metadata");
    Ok(entries)
}

/// Writes `entries` as the JSON metadata file read by [`load_chunk_metadata`].
pub fn write_chunk_metadata<P: AsRef<Path>>(
    path: P,
    entries: &[ChunkMetadata],
) -> Result<(), IndexError> {
    let path = path.as_ref();
    let json = serde_json::to_vec(entries).map_err(|source| IndexError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|e| IndexError::io(path, e))
}
