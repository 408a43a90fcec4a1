//! Ledger domain errors

use thiserror::Error;

use core_kernel::{AccountNumber, CoreError, TemporalError, VerificationNumber};

/// Errors that can occur while operating on a book
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    /// Account number already registered
    #[error("An account with number {0} already exists.")]
    DuplicateAccount(AccountNumber),

    /// Extension name already registered
    #[error("Extension {0} already applied to this book.")]
    DuplicateExtension(String),

    /// Argument of the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Classifier type with no registered predicates
    #[error("Invalid classifier type: {0}")]
    InvalidClassifierType(String),

    /// Unparsable date input
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Fiscal year that does not touch either end of the chain
    #[error("The fiscal year must be adjacent to the current range.")]
    Adjacency {
        from: String,
        to: String,
    },

    /// Allocated verification number already in use
    #[error("Internal verification numbering error: {0} is already taken.")]
    NumberingCollision(VerificationNumber),

    /// Failure raised by an extension hook
    #[error("Extension {name} failed: {message}")]
    Extension {
        name: String,
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reserved operation
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
}

impl BookError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BookError::InvalidArgument(message.into())
    }

    /// Error an extension returns from one of its hooks
    pub fn extension(name: impl Into<String>, message: impl Into<String>) -> Self {
        BookError::Extension {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<TemporalError> for BookError {
    fn from(error: TemporalError) -> Self {
        match error {
            TemporalError::InvalidDate(text) => BookError::InvalidDate(text),
            other => BookError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<CoreError> for BookError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Temporal(inner) => inner.into(),
            CoreError::InvalidArgument(message) => BookError::InvalidArgument(message),
            CoreError::Configuration(message) => BookError::Configuration(message),
        }
    }
}

impl From<config::ConfigError> for BookError {
    fn from(error: config::ConfigError) -> Self {
        BookError::Configuration(error.to_string())
    }
}
