//! The two surfaces the engine talks through.
//!
//! Every component of the engine reaches the outside world through exactly
//! two seams: an outbound command sink and a front-end reporter. Both are
//! traits so the runner can wire them to a real transport and UI while
//! tests substitute recorders.

use std::collections::VecDeque;

/// Where outbound command text goes.
///
/// Implementations must not block: the engine runs inside the chunk
/// callback and the next delivery only happens after it returns.
pub trait CommandSink {
    /// Queues one command line. The line terminator is appended at the
    /// transport edge, not here.
    fn send_line(&mut self, command: &str);

    /// Asks the transport to drop the link at the next opportunity.
    fn hangup(&mut self);
}

/// The UI collaborator's error surface.
pub trait FrontEnd {
    /// Surfaces a message to the user. `fatal` means the front end should
    /// exit once the user acknowledges; non-fatal errors leave the client
    /// alive in the offline phase.
    fn report(&mut self, fatal: bool, message: &str);
}

// ---------------------------------------------------------------------------
// QueueSink
// ---------------------------------------------------------------------------

/// A [`CommandSink`] backed by a queue the runner drains between chunks.
#[derive(Debug, Default)]
pub struct QueueSink {
    queue: VecDeque<String>,
    hangup: bool,
}

impl QueueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued command, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        self.queue.drain(..).collect()
    }

    /// Number of commands waiting.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the hangup request and resets it.
    pub fn take_hangup(&mut self) -> bool {
        std::mem::replace(&mut self.hangup, false)
    }
}

impl CommandSink for QueueSink {
    fn send_line(&mut self, command: &str) {
        tracing::debug!(command, "command queued");
        self.queue.push_back(command.to_string());
    }

    fn hangup(&mut self) {
        self.hangup = true;
    }
}

// ---------------------------------------------------------------------------
// TracingFrontEnd
// ---------------------------------------------------------------------------

/// A [`FrontEnd`] that routes reports to the log. Useful for headless
/// runs and as a placeholder while a real UI is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFrontEnd;

impl FrontEnd for TracingFrontEnd {
    fn report(&mut self, fatal: bool, message: &str) {
        if fatal {
            tracing::error!(message, "fatal error");
        } else {
            tracing::warn!(message, "error");
        }
    }
}
