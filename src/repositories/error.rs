//! Storage outcome classification.

use thiserror::Error;

/// Failure reported by a [`UserStore`](super::UserStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the requested id
    #[error("no user matched the requested id")]
    NotFound,

    /// A connection could not be acquired
    #[error("storage connection unavailable")]
    Pool {
        #[source]
        source: anyhow::Error,
    },

    /// The backend rejected or failed the operation
    #[error("storage operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
