//! Error types for the Campus Portal client.

use std::time::Duration;
use thiserror::Error;

/// A shared error type for the entire portal client.
///
/// Variants fall into three groups:
/// - transport and protocol failures of the remote backend, which the
///   gateway absorbs by switching to the demo backend,
/// - caller-facing failures (validation, credentials, missing session),
///   which are always surfaced,
/// - local failures of storage and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Network-level failure (connection refused, DNS, broken body stream)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status
    #[error("HTTP error: status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The backend did not answer within the configured deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The response could not be understood (bad JSON, missing or failed message code)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Caller-supplied input is incomplete; rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// The backend explicitly rejected the credentials
    #[error("{0}")]
    InvalidCredentials(String),

    /// No session token is stored
    #[error("Not authenticated: please log in first")]
    NotAuthenticated,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidCredentials error
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Transport-level failure: unreachable, timed out, or non-2xx.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Timeout(_)
        )
    }

    /// The response arrived but was not the expected structure.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Whether a failure of the remote backend should move the client to
    /// the demo backend.
    pub fn is_fallback_trigger(&self) -> bool {
        self.is_transport() || self.is_protocol()
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an invalid-credentials error
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials(_))
    }

    /// Whether the stored authentication state can no longer be trusted.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, Self::InvalidCredentials(_) | Self::NotAuthenticated)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PortalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PortalError>`.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_triggers() {
        assert!(PortalError::transport("connection refused").is_fallback_trigger());
        assert!(
            PortalError::HttpStatus {
                status: 502,
                message: "Bad Gateway".into()
            }
            .is_fallback_trigger()
        );
        assert!(PortalError::Timeout(Duration::from_secs(5)).is_fallback_trigger());
        assert!(PortalError::protocol("messageCode 1400").is_fallback_trigger());
    }

    #[test]
    fn test_caller_errors_do_not_trigger_fallback() {
        assert!(!PortalError::validation("Please select a program").is_fallback_trigger());
        assert!(!PortalError::invalid_credentials("nope").is_fallback_trigger());
        assert!(!PortalError::NotAuthenticated.is_fallback_trigger());
        assert!(!PortalError::io("disk full").is_fallback_trigger());
    }

    #[test]
    fn test_invalidates_session() {
        assert!(PortalError::NotAuthenticated.invalidates_session());
        assert!(PortalError::invalid_credentials("expired").invalidates_session());
        assert!(!PortalError::transport("down").invalidates_session());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: PortalError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        match err {
            PortalError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
