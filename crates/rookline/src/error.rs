//! Unified error type for the Rookline client.

use rookline_panel::PanelError;
use rookline_protocol::ProtocolError;
use rookline_session::SessionError;
use rookline_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `rookline` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RooklineError {
    /// A transport-level error (dial, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (snapshot decoding).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (configuration, login rejection).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A panel-level error (log buffer setup).
    #[error(transparent)]
    Panel(#[from] PanelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectFailed(std::io::Error::other("down"));
        let wrapped: RooklineError = err.into();
        assert!(matches!(wrapped, RooklineError::Transport(_)));
        assert!(wrapped.to_string().contains("down"));
    }

    #[test]
    fn test_from_protocol_error() {
        let wrapped: RooklineError = ProtocolError::IllegalMove.into();
        assert!(matches!(wrapped, RooklineError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let wrapped: RooklineError = SessionError::EmptyPassword.into();
        assert!(matches!(wrapped, RooklineError::Session(_)));
        assert_eq!(wrapped.to_string(), "Empty Password");
    }

    #[test]
    fn test_from_panel_error() {
        let err = PanelError::ZeroGeometry { cols: 0, rows: 24 };
        let wrapped: RooklineError = err.into();
        assert!(matches!(wrapped, RooklineError::Panel(_)));
    }
}
