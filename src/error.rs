//! Error types for network lookups.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpiError {
    #[error("Command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Failed to parse output: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("No sockets available: {0}")]
    NoSocket(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IpiError>;
