//! Report error types.

use thiserror::Error;

/// Errors that can occur while rendering reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Unknown export kind: {0}")]
    UnknownKind(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
