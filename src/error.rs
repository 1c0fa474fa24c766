//! Error types for chainview

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    /// The node could not be reached or the connection broke mid-request.
    NetworkError(String),
    /// The node answered with a non-2xx status.
    StatusError { code: u16, body: String },
    /// The node answered 2xx but the body was not the JSON we expected.
    DecodeError(String),
    InvalidInput(String),
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ViewError::StatusError { code, body } => {
                if body.is_empty() {
                    write!(f, "Node returned HTTP {}", code)
                } else {
                    write!(f, "Node returned HTTP {}: {}", code, body)
                }
            }
            ViewError::DecodeError(msg) => write!(f, "Malformed response: {}", msg),
            ViewError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ViewError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ViewError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<std::io::Error> for ViewError {
    fn from(err: std::io::Error) -> Self {
        ViewError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::DecodeError(err.to_string())
    }
}

impl From<toml::de::Error> for ViewError {
    fn from(err: toml::de::Error) -> Self {
        ViewError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ViewError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ViewError::DecodeError(err.to_string())
        } else if let Some(status) = err.status() {
            ViewError::StatusError {
                code: status.as_u16(),
                body: String::new(),
            }
        } else {
            ViewError::NetworkError(err.to_string())
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ViewError>;
