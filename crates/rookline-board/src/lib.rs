//! Board state and move selection for Rookline.
//!
//! [`BoardState`] is the client's copy of the position: 64 ASCII cells fed
//! by the snapshot decoder, a cursor, and up to one pending source square.
//! The snapshot decoder is authoritative for the cells; the selection
//! machinery only stages a move locally and emits command text — it never
//! commits a move to the board itself, the next snapshot does that.

mod board;
mod select;

pub use board::{BoardState, STARTING_CELLS};
pub use select::{BoardInput, MoveText, Selection};
