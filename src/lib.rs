//! mcp-delete-group: command-line client that asks an MCP server to delete a group
//!
//! The client authenticates with an opaque token and sends a single
//! `delete_group` command over a raw TCP connection, then reports whatever
//! the server answers.
//!
//! # Modules
//!
//! - [`config`]: Configuration assembly and validation
//! - [`error`]: Error types
//! - [`mcp`]: Command envelope, TCP transport, and request dispatcher

pub mod config;
pub mod error;
pub mod mcp;

pub use error::{ClientError, ConfigError};
pub use mcp::client::{send_delete_group_request, McpClient};
