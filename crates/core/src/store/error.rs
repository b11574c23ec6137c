//! Store error types.

use thiserror::Error;
use yojitsu_shared::AppError;
use yojitsu_shared::types::AmountOverflow;

use crate::budget::BudgetError;

/// Errors from loading or querying the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity name.
        kind: &'static str,
        /// Requested ID.
        id: String,
    },

    /// Two records in a snapshot share an ID.
    #[error("Duplicate {kind} id in snapshot: {id}")]
    DuplicateId {
        /// Entity name.
        kind: &'static str,
        /// Offending ID.
        id: String,
    },

    /// Snapshot file could not be read.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Snapshot path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the expected shape.
    #[error("Invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot budgets violate slot uniqueness.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// A snapshot amount is outside the storable range.
    #[error("{kind} {id}: {source}")]
    AmountOutOfRange {
        /// Entity name.
        kind: &'static str,
        /// Offending ID.
        id: String,
        /// Underlying error.
        #[source]
        source: AmountOverflow,
    },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound(e.to_string()),
            StoreError::DuplicateId { .. }
            | StoreError::Parse(_)
            | StoreError::AmountOutOfRange { .. } => Self::Validation(e.to_string()),
            StoreError::Io { .. } => Self::Internal(e.to_string()),
            StoreError::Budget(inner) => inner.into(),
        }
    }
}
