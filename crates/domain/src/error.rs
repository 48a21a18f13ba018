//! Domain error types.

use state_store::StoreError;
use thiserror::Error;

use crate::farm::FarmError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the state store.
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// A farm command was rejected.
    #[error("{0}")]
    Farm(FarmError),

    /// The stored document could not be read or written as farm state.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Returns true if the command was rejected by a business rule.
    ///
    /// When false, the failure happened while loading or saving, and the
    /// previously stored state is still the authoritative one.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DomainError::Farm(_))
    }

    /// Returns true if another writer changed the document in between.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Store(StoreError::RevisionConflict { .. })
        )
    }
}
