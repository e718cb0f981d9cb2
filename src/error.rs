//! Error types shared across the crate

use thiserror::Error;

/// Errors raised while fetching, parsing, navigating or configuring
#[derive(Debug, Error)]
pub enum HolonetError {
    /// Transport-level failure (DNS, connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("Server returned status {0}")]
    Status(u16),

    /// Body was not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was valid but not shaped the way a screen expects
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A route was entered without one of its required parameters
    #[error("Missing navigation parameter: {0}")]
    MissingParam(&'static str),

    /// No route is registered under this name
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The background fetch runtime could not be started or has gone away
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HolonetError>;
