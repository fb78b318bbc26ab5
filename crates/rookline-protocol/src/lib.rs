//! Protocol layer for Rookline.
//!
//! The server side of the wire is free-form ASCII: prompts, notices, and
//! fixed-format lines, with no framing guarantee — a delivery can start or
//! end anywhere. This crate holds everything that understands that text:
//!
//! - **Markers** — the exact byte substrings that identify situations.
//! - **Tokenizer** — bounded field extraction shared by the decoders.
//! - **Frame** — decoding a full-board snapshot line into [`GameFrame`].
//! - **Sought** — the incremental scanner over the open-match listing.
//! - **Piece** — board-cell letters to typed pieces and sides.
//!
//! The protocol layer is pure: it never sends, never logs to panels, and
//! holds no session state. Deciding what to do with a decoded frame or a
//! matched candidate is the client engine's job.

pub mod markers;

mod error;
mod frame;
mod piece;
mod sought;
mod token;

pub use error::ProtocolError;
pub use frame::{parse_snapshot, GameFrame, Snapshot};
pub use piece::{piece_from_cell, Piece, PieceKind, Side};
pub use sought::{SeekFilter, SoughtOutcome, SoughtScanner};
pub use token::{copy_field, is_number_byte, is_space, parse_decimal};
