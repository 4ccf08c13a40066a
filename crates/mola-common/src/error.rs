//! Error types for the MOLA grid mapper.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using MolaError.
pub type MolaResult<T> = Result<T, MolaError>;

/// Primary error type for mapper operations.
#[derive(Debug, Error)]
pub enum MolaError {
    // === Image Errors ===
    #[error("image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("error while processing image: {0}")]
    ImageProcessing(String),

    // === Configuration Errors ===
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // === Dataset Errors ===
    #[error("PDS label error: {0}")]
    Label(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl MolaError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            MolaError::InvalidConfig(_) => 2,
            MolaError::ImageNotFound(_) => 3,
            MolaError::ImageProcessing(_) => 4,
            _ => 1,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for MolaError {
    fn from(err: std::io::Error) -> Self {
        MolaError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MolaError {
    fn from(err: serde_json::Error) -> Self {
        MolaError::Json(err.to_string())
    }
}
