//! Error types for pagechat operations.
//!
//! This module provides the error hierarchy using `thiserror` for every
//! stage of a round trip: context collection, the relay, the backend call,
//! file I/O, and CLI commands.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for pagechat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for pagechat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No foreground source (tab) to collect context from.
    #[error("No active tab found")]
    NoActiveSource,

    /// The context collector could not be reached or did not answer.
    ///
    /// The relay recovers from this locally; it never reaches a surface.
    #[error("could not get page context: {reason}")]
    ContextUnavailable {
        /// Why the collector failed.
        reason: String,
    },

    /// The backend did not answer within the configured timeout.
    #[error("Backend request timed out after {after:?}")]
    Timeout {
        /// Timeout that expired.
        after: Duration,
    },

    /// The backend answered with a body that is not JSON.
    #[error("Backend returned non-JSON: {body}")]
    NonJson {
        /// Raw response body.
        body: String,
    },

    /// HTTP or application-level failure reported by the backend.
    #[error("{message}")]
    Backend {
        /// Server-supplied or status-derived message.
        message: String,
    },

    /// Network-level failure (connection refused, DNS, reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// An actor's mailbox or reply channel closed before it answered.
    #[error("{0}")]
    Disconnected(String),

    /// I/O errors (page snapshot files).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Creates a backend error with the given message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns true for failures below the HTTP layer.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns true when no readable backend answer came back: the
    /// connection failed, the deadline passed, or the body was not JSON.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout { .. } | Self::NonJson { .. }
        )
    }
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Page snapshot could not be parsed.
    #[error("invalid page snapshot: {path}: {reason}")]
    InvalidSnapshot {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),
}

// Implement From traits for library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::Config {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::backend(format!("Backend error (HTTP {})", status.as_u16()))
        } else {
            Self::Connection(err.to_string())
        }
    }
}
