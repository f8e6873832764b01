//! Client configuration assembly and validation.
//!
//! The client takes its whole configuration from command-line flags. This
//! module turns the raw flag values into a validated [`ClientConfig`] before
//! any network activity happens.

mod settings;

pub use settings::{ClientConfig, LoggingConfig, ReadStrategy, DEFAULT_IDLE_TIMEOUT};

use std::time::Duration;

use crate::error::ConfigError;

/// Raw, unvalidated values as they arrive from the command line.
///
/// Missing flags are `None`; they are reported by [`load_config`] rather than
/// by the argument parser so that every omission is named in one message.
#[derive(Debug, Default, Clone)]
pub struct RawArgs {
    /// `--server-ip`
    pub server_ip: Option<String>,
    /// `--server-port`
    pub server_port: Option<u16>,
    /// `--token`
    pub token: Option<String>,
    /// `--group-name`
    pub group_name: Option<String>,
    /// `--read-until-eof`
    pub read_until_eof: bool,
    /// `--idle-timeout-ms`
    pub idle_timeout_ms: Option<u64>,
    /// `--timeout` in seconds
    pub timeout_secs: Option<u64>,
}

/// Builds and validates the client configuration from raw flag values.
///
/// Absent values collapse to their zero value (empty string or port 0) and
/// are then rejected by [`ClientConfig::validate`].
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if any required value is missing,
/// empty, or zero.
pub fn load_config(raw: RawArgs) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::new(
        raw.server_ip.unwrap_or_default(),
        raw.server_port.unwrap_or_default(),
        raw.token.unwrap_or_default(),
        raw.group_name.unwrap_or_default(),
    );

    if raw.read_until_eof {
        config.read_strategy = ReadStrategy::UntilEof;
    }
    if let Some(ms) = raw.idle_timeout_ms {
        config.idle_timeout = Duration::from_millis(ms);
    }
    config.timeout = raw.timeout_secs.map(Duration::from_secs);

    config.validate()?;

    Ok(config)
}
