//! Error types for the protocol layer.

/// Errors that can occur while decoding server text.
///
/// Both variants are recovered from by asking the server for a fresh
/// snapshot; neither is surfaced to the user.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The snapshot line carries the illegal-move flag instead of a board.
    #[error("snapshot flagged an illegal move")]
    IllegalMove,

    /// The delivered chunk ended before the snapshot's fixed fields did.
    /// Records are never reassembled across deliveries, so the frame is
    /// abandoned whole.
    #[error("snapshot truncated by the delivery boundary")]
    TruncatedFrame,
}
