//! Error types for the Digestify library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestifyError>;

#[derive(Error, Debug)]
pub enum DigestifyError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
