//! Error types for NuComp

use thiserror::Error;

/// NuComp error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fatal configuration error: bad input list, undeducible file format,
    /// or a file whose pre-scan never produced usable run metadata.
    #[error("Config error: {0}")]
    Config(String),

    /// Event-input error, carrying file-path context.
    #[error("Input error: {0}")]
    Input(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
