use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by index and metadata operations.
pub enum IndexError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File does not start with the expected magic bytes.
    #[error("'{path}' is not a chunk index (bad magic)")]
    BadMagic { path: PathBuf },

    #[error("unsupported index version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Header row count does not match the file length.
    #[error("index '{path}' is truncated: expected {expected} bytes, found {actual}")]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Header values cannot describe a real file.
    #[error("index '{path}' has a corrupt header: {reason}")]
    CorruptHeader { path: PathBuf, reason: String },

    #[error("index data is misaligned for f32 access")]
    Misaligned,

    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("failed to parse chunk metadata '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }
}
