use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in credstore.
#[derive(Debug, Error)]
pub enum StoreError {
    // --- Record errors ---
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("User '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    // --- Hashing errors ---
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Unsupported hash scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Password hashing failed: {0}")]
    HashFailed(String),

    // --- Config errors ---
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file error in {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for credstore results.
pub type Result<T> = std::result::Result<T, StoreError>;
