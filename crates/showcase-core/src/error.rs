//! Error types for the showcase adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the SDK while starting a user session.
///
/// This is the only classified failure of the adapter. Every other SDK
/// problem arrives through the listener's error callback as an [`SdkError`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStartError {
    /// The SDK could not reach its backend.
    #[error("Network error: {0}")]
    Network(String),

    /// The SDK rejected the session parameters.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SessionStartError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Generic error delivered by the SDK through its error callback.
///
/// These are log-worthy and never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct SdkError {
    pub message: String,
}

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A shared error type for the showcase workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShowcaseError {
    /// Session start failed inside the SDK
    #[error("Session start failed: {0}")]
    SessionStart(#[from] SessionStartError),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The UI context stopped receiving messages
    #[error("UI context closed: {0}")]
    ContextClosed(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShowcaseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a ContextClosed error
    pub fn context_closed(message: impl Into<String>) -> Self {
        Self::ContextClosed(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a session start failure
    pub fn is_session_start(&self) -> bool {
        matches!(self, Self::SessionStart(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if the UI context has gone away
    pub fn is_context_closed(&self) -> bool {
        matches!(self, Self::ContextClosed(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShowcaseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShowcaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShowcaseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShowcaseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShowcaseError>`.
pub type Result<T> = std::result::Result<T, ShowcaseError>;
