//! The pump between a transport connection and the engine.
//!
//! The engine is synchronous; this is the one place that awaits. Each loop
//! turn receives one chunk, hands it to the engine, then flushes whatever
//! commands the engine queued. Commands get their line terminator here, at
//! the transport edge.

use tracing::debug;

use rookline_session::SessionPhase;
use rookline_transport::{Connection, TransportError};

use crate::client::Client;
use crate::surface::{FrontEnd, QueueSink};
use crate::RooklineError;

/// Drives `client` over `conn` until the session ends.
///
/// Ends when the engine goes offline (rejection, cancel, sign-off), the
/// engine requests a hangup, or the peer closes the link. An unexpected
/// close or read failure is routed through the engine's transport-error
/// path first so the user sees it.
///
/// # Errors
/// Propagates transport failures from sending or closing; receive failures
/// are consumed by the engine's error path.
pub async fn run_session<C, F>(
    client: &mut Client<QueueSink, F>,
    conn: &mut C,
) -> Result<(), RooklineError>
where
    C: Connection<Error = TransportError>,
    F: FrontEnd,
{
    // connect() queues nothing today, but flush first so any future
    // pre-dial commands are not stranded until the first chunk.
    flush(client, conn).await?;

    loop {
        match conn.recv().await {
            Ok(Some(chunk)) => client.on_chunk(&chunk),
            Ok(None) => {
                if client.phase() != SessionPhase::Offline {
                    client.on_transport_error();
                }
                break;
            }
            Err(error) => {
                debug!(%error, "receive failed");
                client.on_transport_error();
                break;
            }
        }

        flush(client, conn).await?;

        if client.sink_mut().take_hangup() {
            conn.close().await?;
            break;
        }
        if client.phase() == SessionPhase::Offline {
            break;
        }
    }

    Ok(())
}

/// Sends every queued command, appending the line terminator.
async fn flush<C, F>(client: &mut Client<QueueSink, F>, conn: &mut C) -> Result<(), RooklineError>
where
    C: Connection<Error = TransportError>,
    F: FrontEnd,
{
    for command in client.sink_mut().drain() {
        let mut line = command;
        line.push('\n');
        conn.send(line.as_bytes()).await?;
    }
    Ok(())
}
