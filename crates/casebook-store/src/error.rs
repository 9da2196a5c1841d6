//! Store errors

use std::path::PathBuf;

/// Failures while persisting a collection
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Records could not be encoded as JSON
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend refused the write
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
