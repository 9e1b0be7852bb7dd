//! Custom error types for Bookkeeper
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Bookkeeper operations
#[derive(Error, Debug)]
pub enum BookkeeperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for entities entering the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {pk}")]
    NotFound { entity_type: &'static str, pk: u64 },

    /// An entity that already carries a primary key was added again
    #[error("{entity_type} is already stored with key {pk}")]
    AlreadyStored { entity_type: &'static str, pk: u64 },

    /// Storage errors (poisoned locks)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failure while seeding data or wiring the presenter
    #[error("Startup error: {0}")]
    Startup(String),

    /// View errors (terminal I/O, missing handlers)
    #[error("View error: {0}")]
    View(String),
}

impl BookkeeperError {
    /// Create a "not found" error for the given entity type
    pub fn not_found(entity_type: &'static str, pk: impl Into<u64>) -> Self {
        Self::NotFound {
            entity_type,
            pk: pk.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BookkeeperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookkeeperError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Bookkeeper operations
pub type BookkeeperResult<T> = Result<T, BookkeeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookkeeperError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BookkeeperError::not_found("Expense", 7u64);
        assert_eq!(err.to_string(), "Expense not found: 7");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_already_stored_error() {
        let err = BookkeeperError::AlreadyStored {
            entity_type: "Budget",
            pk: 3,
        };
        assert_eq!(err.to_string(), "Budget is already stored with key 3");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BookkeeperError = io_err.into();
        assert!(matches!(err, BookkeeperError::Io(_)));
    }
}
