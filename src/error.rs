//! Custom error types for famfin
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for famfin operations
#[derive(Error, Debug)]
pub enum FamfinError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// An id prefix matched more than one record
    #[error("{entity_type} identifier '{identifier}' is ambiguous ({matches} matches); type more of the ID")]
    Ambiguous {
        entity_type: &'static str,
        identifier: String,
        matches: usize,
    },

    /// Shopping list is archived and can no longer be edited
    #[error("Shopping list is archived: {0}")]
    Archived(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Category suggestion errors
    #[error("Categorizer error: {0}")]
    Categorizer(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FamfinError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget plans
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for debts and credits
    pub fn debt_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Debt/credit item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for shopping lists
    pub fn shopping_list_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Shopping list",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for family spaces
    pub fn space_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Family space",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if an identifier matched several records
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FamfinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FamfinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for famfin operations
pub type FamfinResult<T> = Result<T, FamfinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FamfinError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FamfinError::account_not_found("Wallet");
        assert_eq!(err.to_string(), "Account not found: Wallet");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = FamfinError::Duplicate {
            entity_type: "Account",
            identifier: "Bank".into(),
        };
        assert_eq!(err.to_string(), "Account already exists: Bank");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FamfinError = io_err.into();
        assert!(matches!(err, FamfinError::Io(_)));
    }
}
