//! Transport abstraction layer for Rookline.
//!
//! Provides the [`Connection`] trait that abstracts the byte pipe to the
//! server, and the plain-TCP implementation the chess servers actually
//! speak (a telnet-style socket, no TLS, no framing).
//!
//! The transport delivers arbitrary-length chunks — a read may start or end
//! anywhere in the server's output. Everything above this layer is written
//! around that fact, so the transport makes no attempt to reassemble lines.

#![allow(async_fn_in_trait)]

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::TcpConnection;

use std::fmt;

/// Opaque identifier for a connection, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A dialed connection that can send and receive bytes.
pub trait Connection: Send + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends data to the server.
    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next chunk from the server.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed. Chunk
    /// boundaries carry no meaning.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection.
    async fn close(&mut self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
