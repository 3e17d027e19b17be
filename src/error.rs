// src/error.rs

//! Unified error handling for the member viewer.

use std::fmt;

use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The data source answered with a non-success status
    #[error("Request failed.  Returned status of {status}")]
    Fetch { status: u16, location: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rendering error
    #[error("Render error for {target}: {message}")]
    Render { target: String, message: String },
}

impl AppError {
    /// Create a fetch failure for the given location.
    pub fn fetch(status: u16, location: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            location: location.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a render error with the target container as context.
    pub fn render(target: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            target: target.into(),
            message: message.to_string(),
        }
    }

    /// Status code of a failed fetch, if this is one.
    pub fn fetch_status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
