use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid set name: {0}")]
    InvalidNamespaceSet(String),

    #[error("unsupported key type: {0}")]
    UnsupportedKey(&'static str),
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
