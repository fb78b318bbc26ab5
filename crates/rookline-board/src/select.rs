//! Cursor movement and the move-selection state machine.
//!
//! Selection has two states: nothing picked, or a source square picked.
//! A second pick either clears (same square), is refused (own piece), or
//! commits — producing `<file><rank>-<file><rank>` text for the outbound
//! command channel. There is deliberately no turn check here: the server
//! is authoritative and simply refuses moves made out of turn.

use arrayvec::ArrayString;
use rookline_protocol::piece_from_cell;
use tracing::trace;

use crate::BoardState;

/// Directional and selection events routed to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardInput {
    Up,
    Down,
    Left,
    Right,
    Select,
}

/// Outbound move command text, e.g. `e2-e4`.
pub type MoveText = ArrayString<5>;

/// What a select event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing happened (empty square, wrong side, no cursor).
    Ignored,
    /// The cursor square became the pending source.
    Picked(u8),
    /// The pending source was re-selected and cleared.
    Cleared,
    /// Source and destination are set: send this command.
    Move(MoveText),
}

impl BoardState {
    /// Moves the cursor one square. Row changes wrap across the whole
    /// board; column changes wrap within the row. Ignored while no cursor
    /// is placed.
    pub fn move_cursor(&mut self, input: BoardInput) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let next = match input {
            BoardInput::Up => {
                if cursor < 8 {
                    cursor + 56
                } else {
                    cursor - 8
                }
            }
            BoardInput::Down => {
                if cursor > 55 {
                    cursor - 56
                } else {
                    cursor + 8
                }
            }
            BoardInput::Left => {
                if cursor & 7 == 0 {
                    cursor + 7
                } else {
                    cursor - 1
                }
            }
            BoardInput::Right => {
                if cursor & 7 == 7 {
                    cursor - 7
                } else {
                    cursor + 1
                }
            }
            BoardInput::Select => cursor,
        };
        self.cursor = Some(next);
    }

    /// Handles a select event at the cursor square.
    pub fn select(&mut self) -> Selection {
        let Some(cursor) = self.cursor else {
            return Selection::Ignored;
        };
        let piece = piece_from_cell(self.cell(cursor));

        match self.picked {
            None => match piece {
                Some(p) if p.side == self.my_side => {
                    trace!(square = cursor, "source picked");
                    self.picked = Some(cursor);
                    Selection::Picked(cursor)
                }
                _ => Selection::Ignored,
            },
            Some(source) if source == cursor => match piece {
                Some(p) if p.side == self.my_side => {
                    trace!(square = cursor, "source cleared");
                    self.picked = None;
                    Selection::Cleared
                }
                _ => Selection::Ignored,
            },
            Some(source) => {
                if matches!(piece, Some(p) if p.side == self.my_side) {
                    return Selection::Ignored;
                }
                self.picked = None;
                let text = move_text(source, cursor);
                trace!(command = %text, "move staged");
                Selection::Move(text)
            }
        }
    }
}

/// Formats the two squares as command text, deriving file and rank from the
/// cell index arithmetically.
fn move_text(source: u8, destination: u8) -> MoveText {
    let mut text = MoveText::new();
    for square in [source, destination] {
        text.push((b'a' + (square & 7)) as char);
        text.push((b'8' - square / 8) as char);
        if square == source {
            text.push('-');
        }
    }
    text
}

// =========================================================================
// Tests
// =========================================================================
