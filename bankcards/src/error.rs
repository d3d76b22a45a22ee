//! Error types for the bank-cards domain core

use thiserror::Error;

/// Custom error type for bank-cards operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Operation refused: {0}")]
    StateConflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Encryption failure: {0}")]
    Encryption(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for bank-cards operations
pub type Result<T> = std::result::Result<T, Error>;
