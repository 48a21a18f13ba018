use thiserror::Error;

use crate::Revision;

/// Errors that can occur when reading or writing the state document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored revision did not match the revision the writer loaded.
    #[error(
        "Revision conflict for document {name}: expected revision {expected}, found {actual}"
    )]
    RevisionConflict {
        name: String,
        expected: Revision,
        actual: Revision,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
