//! Command envelope sent to the MCP server.
//!
//! Every request is a single JSON object written to the socket with no
//! framing and no trailing newline:
//!
//! ```json
//! {"command":"delete_group","token":"<token>","arguments":{"groupName":"<name>"}}
//! ```
//!
//! Arguments are typed per command through [`McpCommand`] instead of an
//! untyped key/value map.

use std::fmt;

use serde::Serialize;

use crate::error::ClientError;

/// Opaque authentication credential.
///
/// Serialises verbatim but never appears in `Debug` output, so it cannot
/// leak through logs or error reports.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Typed arguments for one server command.
pub trait McpCommand: Serialize {
    /// The literal value of the envelope's `command` field.
    const NAME: &'static str;
}

/// Arguments of the `delete_group` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupArguments {
    /// Name of the group to delete.
    pub group_name: String,
}

impl DeleteGroupArguments {
    /// Creates arguments targeting `group_name`.
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
        }
    }
}

impl McpCommand for DeleteGroupArguments {
    const NAME: &'static str = "delete_group";
}

/// The request object sent to the server.
///
/// Immutable once built; consumed by [`CommandEnvelope::to_payload`].
#[derive(Debug, Serialize)]
pub struct CommandEnvelope<A: McpCommand> {
    command: &'static str,
    token: Token,
    arguments: A,
}

impl<A: McpCommand> CommandEnvelope<A> {
    /// Builds an envelope for command `A` authenticated by `token`.
    #[must_use]
    pub const fn new(token: Token, arguments: A) -> Self {
        Self {
            command: A::NAME,
            token,
            arguments,
        }
    }

    /// Returns the command name.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        self.command
    }

    /// Serialises the envelope to its UTF-8 JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if encoding fails.
    pub fn to_payload(self) -> Result<Vec<u8>, ClientError> {
        serde_json::to_vec(&self).map_err(ClientError::Serialization)
    }
}

/// Convenience constructor for the `delete_group` envelope.
#[must_use]
pub fn delete_group(
    token: Token,
    group_name: impl Into<String>,
) -> CommandEnvelope<DeleteGroupArguments> {
    CommandEnvelope::new(token, DeleteGroupArguments::new(group_name))
}
