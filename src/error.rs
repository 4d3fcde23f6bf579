// ⚠️ Error types for the ingestion pipeline
//
// Only two things can actually fail: talking to the blob store, and
// discovery as a whole. Everything below file level degrades to warnings.

use thiserror::Error;

/// Failure reported by a [`BlobStore`](crate::blob_store::BlobStore) backend.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid object name: {0:?}")]
    InvalidName(String),

    #[error("i/o error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal load failure. Reaching one of these aborts the whole pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("discovery failed: {0}")]
    Discovery(#[from] BlobError),
}

