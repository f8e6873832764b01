//! MCP server client implementation.
//!
//! This module sends commands to an MCP server over a raw TCP connection.
//!
//! # Architecture
//!
//! - [`protocol`]: Command envelope and typed arguments
//! - [`transport`]: TCP connection with the chunked response read loop
//! - [`client`]: Request dispatcher tying the two together
//!
//! # Exchange
//!
//! 1. Serialise the envelope to JSON
//! 2. Connect to `host:port`
//! 3. Write the payload, unframed
//! 4. Read until the server closes or stops sending
//! 5. Hand the response text back to the caller unparsed

pub mod client;
pub mod protocol;
pub mod transport;
