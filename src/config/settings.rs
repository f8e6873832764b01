//! Configuration structures for a single delete-group invocation.
//!
//! Every value originates from the command line; there is no configuration
//! file and no environment lookup.

use std::time::Duration;

use crate::error::ConfigError;
use crate::mcp::protocol::Token;

/// Default window a read may wait after a full chunk before the response is
/// treated as complete.
///
/// A server that pauses longer than this after a full chunk has the rest of
/// its response cut off.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// How the response read loop decides the exchange is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// Stop at end-of-stream or at the first read shorter than a full chunk.
    #[default]
    ShortRead,
    /// Ignore short reads and keep reading until the peer closes.
    UntilEof,
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host name or IP address of the MCP server.
    pub server_address: String,

    /// TCP port of the MCP server.
    pub server_port: u16,

    /// Authentication token forwarded verbatim.
    pub token: Token,

    /// Name of the group to delete.
    pub group_name: String,

    /// Response termination rule.
    pub read_strategy: ReadStrategy,

    /// Idle window applied after a full chunk under [`ReadStrategy::ShortRead`].
    pub idle_timeout: Duration,

    /// Optional connect/read/write timeout. `None` keeps platform defaults.
    pub timeout: Option<Duration>,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Creates a configuration with default tuning for the given target.
    #[must_use]
    pub fn new(
        server_address: impl Into<String>,
        server_port: u16,
        token: impl Into<Token>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            server_port,
            token: token.into(),
            group_name: group_name.into(),
            read_strategy: ReadStrategy::default(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            timeout: None,
            logging: LoggingConfig::default(),
        }
    }

    /// Returns the `host:port` string used for dialling and in messages.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }

    /// Validates the configuration.
    ///
    /// Only empty values are rejected; whitespace is a legitimate value and
    /// is forwarded as given. All problems are collected so a single message
    /// names every missing flag.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is empty, the port is zero, or a
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.server_address.is_empty() {
            problems.push("--server-ip is required");
        }
        if self.server_port == 0 {
            problems.push("--server-port is required and must be non-zero");
        }
        if self.token.expose().is_empty() {
            problems.push("--token is required");
        }
        if self.group_name.is_empty() {
            problems.push("--group-name is required");
        }
        if self.idle_timeout.is_zero() {
            problems.push("--idle-timeout-ms must be non-zero");
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            problems.push("--timeout must be non-zero");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError {
                message: problems.join(", "),
            })
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ClientConfig {
        ClientConfig::new("127.0.0.1", 5000, "secret", "team-alpha")
    }

    #[test]
    fn defaults() {
        let config = valid();
        assert_eq!(config.read_strategy, ReadStrategy::ShortRead);
        assert_eq!(config.idle_timeout, DEFAULT_IDLE_TIMEOUT);
        assert!(config.timeout.is_none());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.endpoint(), "127.0.0.1:5000");
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = valid();
        config.server_port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("--server-port"));
    }

    #[test]
    fn every_missing_flag_is_reported() {
        let config = ClientConfig::new("", 0, "", "");
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("--server-ip"));
        assert!(msg.contains("--server-port"));
        assert!(msg.contains("--token"));
        assert!(msg.contains("--group-name"));
    }

    #[test]
    fn zero_timeouts_rejected() {
        let mut config = valid();
        config.idle_timeout = Duration::ZERO;
        config.timeout = Some(Duration::ZERO);
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("--idle-timeout-ms"));
        assert!(msg.contains("--timeout"));
    }

    #[test]
    fn whitespace_values_are_accepted() {
        let config = ClientConfig::new(" ", 5000, " ", " ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn values_are_not_trimmed() {
        let config = ClientConfig::new("localhost", 1, " tok ", " group ");
        assert!(config.validate().is_ok());
        assert_eq!(config.token.expose(), " tok ");
        assert_eq!(config.group_name, " group ");
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("secret"));
    }
}
