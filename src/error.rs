//! Error types for authbridge

use thiserror::Error;

/// Result type alias for authbridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in authbridge
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The secure random source could not produce bytes. Never retried.
    #[error("Secure random source unavailable: {0}")]
    Entropy(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable error code reported to method channel callers
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArguments(_) => "invalid_arguments",
            Error::Entropy(_) => "internal",
            Error::Browser(_) | Error::Platform(_) => "platform",
            Error::Config(_) => "config",
            Error::Io(_) | Error::Json(_) => "error",
        }
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::Entropy(err.to_string())
    }
}
