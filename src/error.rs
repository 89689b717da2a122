//! Error types for DogTable
//!
//! Every failure the fetch path can produce, plus the few the front-ends add.

use thiserror::Error;

/// Main error type for DogTable operations
#[derive(Error, Debug)]
pub enum DogTableError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dog API returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("UI error: {0}")]
    Ui(String),
}

/// Result type alias for DogTable operations
pub type Result<T> = std::result::Result<T, DogTableError>;

impl DogTableError {
    /// Whether the failure came from the network rather than from the data or the program.
    pub fn is_transient(&self) -> bool {
        match self {
            DogTableError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            DogTableError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
