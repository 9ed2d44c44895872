use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by decision store operations.
pub enum StoreError {
    /// Database file does not exist.
    #[error("decision database not found at '{path}'")]
    NotFound { path: PathBuf },

    #[error("failed to open decision database '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("decision query failed for id {id}: {source}")]
    Query {
        id: i64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("decision database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Injected by test doubles.
    #[error("decision store unavailable: {reason}")]
    Unavailable { reason: String },
}
