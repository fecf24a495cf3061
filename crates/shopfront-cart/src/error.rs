//! Cart error types.

use thiserror::Error;

/// Errors from the underlying key-value storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The write would exceed the storage quota.
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    /// Storage is disabled or inaccessible (private mode, sandboxed frame).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Accumulating quantities overflowed.
    #[error("Quantity overflow for item {0}")]
    QuantityOverflow(String),
}
