use axum::http::StatusCode;
use thiserror::Error;

use crate::repositories::StoreError;

/// Storage operation a request was forwarding when a failure occurred.
///
/// Each operation carries its own fixed public failure message, and decides
/// whether a "no row matched" outcome is reported as 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::List => "list users",
            StoreOperation::Create => "create user",
            StoreOperation::Get => "get user",
            StoreOperation::Update => "update user",
            StoreOperation::Delete => "delete user",
        }
    }

    /// Message returned to clients when this operation fails in storage.
    pub fn failure_message(&self) -> &'static str {
        match self {
            StoreOperation::List => "failed to fetch users",
            StoreOperation::Create => "failed to create user",
            StoreOperation::Get => "failed to fetch user",
            StoreOperation::Update => "failed to update user",
            StoreOperation::Delete => "failed to delete user",
        }
    }

    /// Only id-addressed operations can legitimately miss a row.
    fn reports_not_found(&self) -> bool {
        matches!(
            self,
            StoreOperation::Get | StoreOperation::Update | StoreOperation::Delete
        )
    }
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a user request can end in an error response.
///
/// Client errors are produced by request normalization before storage is
/// touched. `NotFound` and `Storage` come from classifying a storage outcome
/// with [`AppError::from_store`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Body could not be read or decoded as JSON
    #[error("invalid request body")]
    MalformedBody,

    /// Path had no id segment after the collection prefix
    #[error("id is required")]
    MissingIdentifier,

    /// Id segment was not an integer
    #[error("id must be an integer")]
    InvalidIdentifier,

    /// Create payload had an empty name after trimming
    #[error("name is required")]
    MissingName,

    /// Create payload had an empty email after trimming
    #[error("email is required")]
    MissingEmail,

    /// Update payload carried neither name nor email
    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// Storage reported that no row matched the id
    #[error("user not found")]
    NotFound,

    /// Any other storage failure
    #[error("storage failure during {operation}")]
    Storage {
        operation: StoreOperation,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Classifies a storage failure for the given operation.
    ///
    /// `StoreError::NotFound` becomes a 404 for get/update/delete. For list
    /// and create it is an unexpected outcome and collapses to a storage
    /// failure like everything else.
    pub fn from_store(operation: StoreOperation, error: StoreError) -> Self {
        match error {
            StoreError::NotFound if operation.reports_not_found() => AppError::NotFound,
            source => AppError::Storage { operation, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedBody
            | AppError::MissingIdentifier
            | AppError::InvalidIdentifier
            | AppError::MissingName
            | AppError::MissingEmail
            | AppError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients. Storage causes are never included.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage { operation, .. } => operation.failure_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
