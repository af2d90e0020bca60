use std::path::PathBuf;

use astool_store::StoreError;
use astool_types::TypeError;
use thiserror::Error;

/// Failure of a single key. Always recovered at the key boundary.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("{0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Key(#[from] TypeError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Errors that end a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The key source broke mid-stream. Keys read before the break were
    /// processed; `failed` of them failed.
    #[error("could not read keys ({failed} failed before the error): {source}")]
    Read {
        source: std::io::Error,
        failed: usize,
    },

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("there are {0} errors")]
    Failures(usize),
}

/// Result alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
