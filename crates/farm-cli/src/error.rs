//! CLI error types.

use std::path::PathBuf;

use domain::{DomainError, FarmError};
use reports::ReportError;
use state_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the person at the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// The farm rules refused the operation; nothing was written.
    #[error("{0}")]
    Rejected(FarmError),

    /// Loading or saving the farm document failed.
    #[error("changes not saved, please retry ({0})")]
    NotSaved(DomainError),

    /// The database could not be opened or migrated.
    #[error("could not open farm database: {0}")]
    Database(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Farm(err) => CliError::Rejected(err),
            other => CliError::NotSaved(other),
        }
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
