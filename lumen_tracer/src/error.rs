//! Error types for the Lumen tracer
//!
//! This module defines the error types used throughout the tracer,
//! including scene setup, GPU upload, and engine initialization.

use std::fmt;

/// Result type for Lumen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumen errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (graphics device, upload sink, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (scene, buffer, primitive data, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, scene manager, configuration)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
