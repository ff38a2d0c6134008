//! Centralized error types for Corpora.

use corpora_db::DbError;
use thiserror::Error;

/// Main error type for corpus and text operations.
#[derive(Error, Debug)]
pub enum CorporaError {
    #[error("Corpus not found: {0}")]
    CorpusNotFound(i64),

    #[error("Text not found: {0}")]
    TextNotFound(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Corpora operations.
pub type CorporaResult<T> = Result<T, CorporaError>;

impl CorporaError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// True for the not-found variants, which the HTTP layer answers with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CorpusNotFound(_) | Self::TextNotFound(_) | Self::Database(DbError::NotFound(_))
        )
    }

    /// Replace a generic database not-found with a typed one.
    pub(crate) fn or_not_found(err: DbError, not_found: Self) -> Self {
        match err {
            DbError::NotFound(_) => not_found,
            other => Self::Database(other),
        }
    }
}
