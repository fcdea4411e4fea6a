//! Error types for the password store

use std::path::PathBuf;
use thiserror::Error;

/// Password store errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Encryption key not found: {}", .0.display())]
    KeyNotFound(PathBuf),

    #[error("Invalid encryption key in {}: expected {expected} bytes, found {found}", path.display())]
    InvalidKey {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Password does not meet the requirements. {0}")]
    ValidationFailure(String),

    #[error("A password for {0} already exists")]
    DuplicateWebsite(String),

    #[error("No password found for {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, PasswordError>;
