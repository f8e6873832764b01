//! Request dispatcher for MCP server commands.
//!
//! A dispatch is one complete exchange: build the envelope, serialise it,
//! connect, write, read until the response ends, decode as text. Nothing is
//! retried; the first failure is returned to the caller.

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::mcp::protocol::{self, CommandEnvelope, McpCommand, Token};
use crate::mcp::transport::McpConnection;

/// Client bound to one server and one tuning profile.
#[derive(Debug, Clone)]
pub struct McpClient {
    config: ClientConfig,
}

impl McpClient {
    /// Creates a client from a validated configuration.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Deletes the configured group.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] naming the stage that failed.
    pub fn delete_configured_group(&self) -> Result<String, ClientError> {
        let envelope = protocol::delete_group(
            self.config.token.clone(),
            self.config.group_name.clone(),
        );
        self.dispatch(envelope)
    }

    /// Sends one command and returns the raw response text.
    ///
    /// The response is not parsed; invalid UTF-8 is replaced rather than
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Serialization`] before any network activity
    /// - [`ClientError::Connection`] if the server cannot be reached
    /// - [`ClientError::Write`] if the payload cannot be sent in full
    /// - [`ClientError::Read`] if the response read fails before it ends
    pub fn dispatch<A: McpCommand>(
        &self,
        envelope: CommandEnvelope<A>,
    ) -> Result<String, ClientError> {
        let command = envelope.command();
        let payload = envelope.to_payload()?;
        let endpoint = self.config.endpoint();
        debug!(command, bytes = payload.len(), "Serialised command envelope");

        let mut connection = McpConnection::connect(
            &self.config.server_address,
            self.config.server_port,
            self.config.timeout,
        )
        .map_err(|source| ClientError::Connection {
            endpoint: endpoint.clone(),
            source,
        })?;
        info!(%endpoint, command, "Connected to MCP server");

        connection
            .send(&payload)
            .map_err(|source| ClientError::Write {
                endpoint: endpoint.clone(),
                source,
            })?;

        let response = connection
            .read_response(self.config.read_strategy, self.config.idle_timeout)
            .map_err(|source| ClientError::Read { endpoint, source })?;

        info!(bytes = response.len(), "Response received from server");
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

/// Asks the server at `server_address:server_port` to delete `group_name`.
///
/// Uses the default tuning: short-read termination, default idle window, no
/// socket timeouts. Inputs are forwarded as given; callers validate them
/// first (see [`ClientConfig::validate`]).
///
/// # Errors
///
/// Returns a [`ClientError`] naming the stage that failed.
pub fn send_delete_group_request(
    server_address: &str,
    server_port: u16,
    token: &str,
    group_name: &str,
) -> Result<String, ClientError> {
    let config = ClientConfig::new(server_address, server_port, Token::new(token), group_name);
    McpClient::new(config).delete_configured_group()
}
