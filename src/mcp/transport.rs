//! TCP transport for MCP commands.
//!
//! One connection carries exactly one exchange:
//!
//! - The request is written in a single logical write, unframed
//! - The response is read in fixed-size chunks until the peer closes or,
//!   under [`ReadStrategy::ShortRead`], until a chunk comes back short
//! - The socket is closed when the [`McpConnection`] is dropped, on every
//!   exit path
//!
//! All I/O blocks the calling thread. Without a configured timeout a silent
//! server blocks the read indefinitely.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::ReadStrategy;

/// Size of each read from the socket.
pub const READ_CHUNK_SIZE: usize = 4096;

/// An open connection to an MCP server.
#[derive(Debug)]
pub struct McpConnection {
    stream: TcpStream,
}

impl McpConnection {
    /// Opens a TCP connection to `host:port`.
    ///
    /// With `timeout` set, each resolved address is tried with that connect
    /// timeout and the stream inherits it for reads and writes. Without it
    /// the platform defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if name resolution fails or no address accepts the
    /// connection.
    pub fn connect(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<Self> {
        let stream = match timeout {
            None => TcpStream::connect((host, port))?,
            Some(timeout) => {
                let stream = connect_with_timeout(host, port, timeout)?;
                stream.set_read_timeout(Some(timeout))?;
                stream.set_write_timeout(Some(timeout))?;
                stream
            }
        };

        if let Ok(peer) = stream.peer_addr() {
            debug!(%peer, "TCP connection established");
        }

        Ok(Self { stream })
    }

    /// Writes the whole payload to the server.
    ///
    /// No delimiter is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written in full.
    pub fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        self.stream.write_all(payload)?;
        self.stream.flush()?;
        debug!(bytes = payload.len(), "Request sent");
        Ok(())
    }

    /// Reads the server response according to `strategy`.
    ///
    /// Under [`ReadStrategy::ShortRead`] a read that fills a whole chunk is
    /// followed by a read bounded by `idle_timeout`; if that read times out
    /// the bytes received so far are the response.
    ///
    /// # Errors
    ///
    /// Returns any read error other than end-of-stream. Partially received
    /// data is discarded.
    pub fn read_response(
        &mut self,
        strategy: ReadStrategy,
        idle_timeout: Duration,
    ) -> io::Result<Vec<u8>> {
        let base_timeout = self.stream.read_timeout()?;
        let mut response = Vec::new();
        let mut chunk = [0_u8; READ_CHUNK_SIZE];
        let mut idle = false;

        loop {
            let read = match self.stream.read(&mut chunk) {
                Ok(0) => {
                    trace!("Peer closed the connection");
                    break;
                }
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if idle && is_timeout(&e) => {
                    warn!(
                        bytes = response.len(),
                        "No data after a full chunk, treating response as complete"
                    );
                    break;
                }
                Err(e) => return Err(e),
            };

            response.extend_from_slice(&chunk[..read]);
            trace!(read, total = response.len(), "Read response chunk");

            if strategy == ReadStrategy::UntilEof {
                continue;
            }
            if read < READ_CHUNK_SIZE {
                break;
            }
            if !idle {
                idle = true;
                self.stream.set_read_timeout(Some(shorter(idle_timeout, base_timeout)))?;
            }
        }

        debug!(bytes = response.len(), "Response received");
        Ok(response)
    }
}

impl Drop for McpConnection {
    fn drop(&mut self) {
        // Already-closed sockets report NotConnected here.
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

fn connect_with_timeout(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;
    for address in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&address, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%address, error = %e, "Connection attempt failed");
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(no_addresses))
}

fn no_addresses() -> io::Error {
    io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses")
}

fn shorter(idle: Duration, base: Option<Duration>) -> Duration {
    base.map_or(idle, |base| base.min(idle))
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_window_never_exceeds_configured_timeout() {
        let idle = Duration::from_millis(500);
        assert_eq!(shorter(idle, None), idle);
        assert_eq!(
            shorter(idle, Some(Duration::from_millis(100))),
            Duration::from_millis(100)
        );
        assert_eq!(shorter(idle, Some(Duration::from_secs(10))), idle);
    }

    #[test]
    fn timeout_kinds() {
        assert!(is_timeout(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_timeout(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(!is_timeout(&io::Error::from(io::ErrorKind::ConnectionReset)));
    }

    #[test]
    fn connect_refused_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        assert!(McpConnection::connect("127.0.0.1", port, None).is_err());
        let timeout = Some(Duration::from_secs(1));
        assert!(McpConnection::connect("127.0.0.1", port, timeout).is_err());
    }
}
