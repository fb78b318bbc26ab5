//! Plain-TCP transport implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::{Connection, ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Largest chunk a single receive delivers. The protocol layer handles
/// chunks of any size, so this only bounds per-read memory.
const RECV_BUFFER: usize = 2048;

/// A plain-TCP [`Connection`] to the game server.
pub struct TcpConnection {
    id: ConnectionId,
    stream: TcpStream,
}

impl TcpConnection {
    /// Dials `host:port`.
    pub async fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(TransportError::ConnectFailed)?;
        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::info!(%id, host, port, "connected");
        Ok(Self { id, stream })
    }

    /// Wraps an already-established stream (tests, proxies).
    pub fn from_stream(stream: TcpStream) -> Self {
        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        Self { id, stream }
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.stream
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut buf = [0u8; RECV_BUFFER];
        let n = self
            .stream
            .read(&mut buf)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            tracing::debug!(id = %self.id, "connection closed by peer");
            return Ok(None);
        }
        Ok(Some(buf[..n].to_vec()))
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.stream
            .shutdown()
            .await
            .map_err(TransportError::CloseFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
