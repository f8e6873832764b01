//! Error types for mcp-delete-group.
//!
//! # Security Note
//!
//! Error messages are carefully crafted to NEVER include the authentication
//! token. Variants carry the endpoint and the underlying cause, never the
//! request payload.

use std::io;

use thiserror::Error;

/// Errors that can occur while assembling the client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors surfaced by the request dispatcher.
///
/// Each variant corresponds to the stage of the exchange that failed, so
/// callers can branch on the kind without inspecting message text.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Inputs were rejected before any network activity.
    #[error(transparent)]
    Validation(#[from] ConfigError),

    /// The command envelope could not be encoded as JSON.
    #[error("failed to serialise request")]
    Serialization(#[source] serde_json::Error),

    /// The TCP connection could not be established.
    #[error("failed to connect to {endpoint}")]
    Connection {
        /// The `host:port` that was dialled.
        endpoint: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The request payload could not be written in full.
    #[error("failed to send request to {endpoint}")]
    Write {
        /// The `host:port` of the server.
        endpoint: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Reading the response failed before the exchange completed.
    #[error("failed to read response from {endpoint}")]
    Read {
        /// The `host:port` of the server.
        endpoint: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "missing --token".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("missing --token"));
    }

    #[test]
    fn validation_is_transparent() {
        let error = ClientError::from(ConfigError::ValidationError {
            message: "server port must be non-zero".to_string(),
        });
        assert!(matches!(error, ClientError::Validation(_)));
        assert_eq!(
            error.to_string(),
            "configuration validation failed: server port must be non-zero"
        );
    }

    #[test]
    fn connection_error_keeps_source() {
        let error = ClientError::Connection {
            endpoint: "127.0.0.1:9".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(error.to_string().contains("127.0.0.1:9"));
        let source = error.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("refused"));
    }
}
