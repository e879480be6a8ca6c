//! Error types for the CropMate client.

use std::collections::BTreeMap;
use thiserror::Error;

/// A shared error type for the entire CropMate client.
///
/// Every backend response is decoded into one of these variants exactly once,
/// at the HTTP client boundary. Callers classify by variant instead of
/// re-parsing response bodies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CropmateError {
    /// Authentication failure (HTTP 401). Handled globally: the session is
    /// cleared by the interceptor before this error reaches the caller.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Validation failure (HTTP 400 with a field map). Local to the calling
    /// form; the session is untouched.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// Conflict (HTTP 409), e.g. an already-registered email.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backend could not be reached (connect failure or timeout).
    #[error("Cannot connect to the advisory service: {message}")]
    Network { message: String },

    /// Any other non-2xx response, surfaced with the server-supplied message.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Client-side rejection before any request is dispatched
    /// (missing field, malformed email, oversized upload).
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Credential storage error (file system operations)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl CropmateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a Validation error with a field map
    pub fn validation(message: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an InvalidInput error for a specific field
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a network/unreachable error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this error annotates specific input fields.
    ///
    /// Returns the field map for server-side validation errors (400 with a
    /// fields map), which callers render next to the matching form fields.
    pub fn fields(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CropmateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CropmateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CropmateError>`.
pub type Result<T> = std::result::Result<T, CropmateError>;
