use astool_types::TypeError;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("key not found: {0}")]
    NotFound(String),

    /// The key cannot address a record.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] TypeError),

    /// Client configuration is unusable.
    #[error("invalid client config: {0}")]
    InvalidConfig(String),

    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other error reported by the backend.
    #[error("{0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
