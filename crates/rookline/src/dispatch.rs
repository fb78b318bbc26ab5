//! Chunk routing: one active handler at a time.
//!
//! Inbound deliveries go to exactly one place: a one-shot trigger keyed to
//! an exact byte pattern, or a continuous stream flow. Switching flows is
//! replacing the active variant — there are no callback registrations to
//! leak, and a trigger shadows any stream until a handler swaps it out.

use rookline_protocol::markers;

/// One-shot byte-pattern triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The server's login prompt; starts the credential exchange.
    LoginPrompt,
    /// Acknowledgment of the last setup variable; the session is online.
    Ready,
    /// The server's sign-off line after `quit`.
    Closed,
}

impl Trigger {
    /// The exact byte pattern this trigger fires on.
    pub fn pattern(self) -> &'static [u8] {
        match self {
            Self::LoginPrompt => markers::LOGIN_PROMPT,
            Self::Ready => markers::SETTINGS_ACK,
            Self::Closed => markers::CONNECTION_CLOSED,
        }
    }
}

/// Continuous per-chunk flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Credential-exchange scanning.
    Login,
    /// Opponent-listing scanning.
    Search,
    /// Regular game traffic (snapshots, notices, chat).
    Game,
}

/// The single active handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Handler {
    #[default]
    Idle,
    Trigger(Trigger),
    Stream(Flow),
}

/// Where a chunk was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// No handler wanted the chunk; it was dropped after logging.
    Dropped,
    /// The trigger pattern matched at `offset`.
    Trigger { trigger: Trigger, offset: usize },
    /// The chunk belongs to the active stream flow.
    Stream(Flow),
}

/// Routes each inbound chunk to at most one handler.
#[derive(Debug, Default)]
pub struct Dispatcher {
    handler: Handler,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot trigger, replacing any previous handler.
    pub fn set_trigger(&mut self, trigger: Trigger) {
        tracing::debug!(?trigger, "trigger armed");
        self.handler = Handler::Trigger(trigger);
    }

    /// Installs a continuous flow, replacing any previous handler.
    pub fn set_stream(&mut self, flow: Flow) {
        tracing::debug!(?flow, "stream flow installed");
        self.handler = Handler::Stream(flow);
    }

    /// Drops whatever handler is active.
    pub fn clear(&mut self) {
        self.handler = Handler::Idle;
    }

    /// The active stream flow, if any.
    pub fn active_flow(&self) -> Option<Flow> {
        match self.handler {
            Handler::Stream(flow) => Some(flow),
            _ => None,
        }
    }

    /// `true` when no handler is installed.
    pub fn is_idle(&self) -> bool {
        self.handler == Handler::Idle
    }

    /// Decides where `chunk` goes. A trigger scans left to right for the
    /// first offset where its pattern matches as a contiguous substring; a
    /// miss drops the chunk rather than falling through to a stream.
    pub fn route(&self, chunk: &[u8]) -> Routed {
        match self.handler {
            Handler::Idle => Routed::Dropped,
            Handler::Trigger(trigger) => match find(chunk, trigger.pattern()) {
                Some(offset) => Routed::Trigger { trigger, offset },
                None => Routed::Dropped,
            },
            Handler::Stream(flow) => Routed::Stream(flow),
        }
    }
}

/// First offset where `needle` occurs in `haystack` as a whole.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_idle_drops_everything() {
        let dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.route(b"login: "), Routed::Dropped);
    }

    #[test]
    fn test_route_trigger_reports_match_offset() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_trigger(Trigger::LoginPrompt);
        assert_eq!(
            dispatcher.route(b"\r\nlogin: "),
            Routed::Trigger {
                trigger: Trigger::LoginPrompt,
                offset: 2
            }
        );
    }

    #[test]
    fn test_route_trigger_miss_drops_chunk() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_trigger(Trigger::LoginPrompt);
        assert_eq!(dispatcher.route(b"welcome to the server"), Routed::Dropped);
        // Still armed for the next delivery.
        assert!(matches!(
            dispatcher.route(b"login: "),
            Routed::Trigger { .. }
        ));
    }

    #[test]
    fn test_route_trigger_shadows_stream() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_stream(Flow::Game);
        dispatcher.set_trigger(Trigger::Ready);
        // The trigger replaced the stream outright: a miss is a drop, not a
        // fall-through.
        assert_eq!(dispatcher.route(b"<12> ..."), Routed::Dropped);
    }

    #[test]
    fn test_route_stream_passes_whole_chunk() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_stream(Flow::Search);
        assert_eq!(dispatcher.route(b"anything"), Routed::Stream(Flow::Search));
        assert_eq!(dispatcher.active_flow(), Some(Flow::Search));
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.set_trigger(Trigger::Closed);
        dispatcher.clear();
        assert!(dispatcher.is_idle());
    }

    #[test]
    fn test_find_needs_full_pattern_inside_chunk() {
        assert_eq!(find(b"abclogin: xyz", b"login:"), Some(3));
        assert_eq!(find(b"logi", b"login:"), None);
        assert_eq!(find(b"", b"login:"), None);
    }
}
