//! The client-side board position and derived match flags.

use rookline_protocol::{GameFrame, Side};
use tracing::debug;

/// The standard starting position, rank 8 first, one ASCII byte per cell.
pub const STARTING_CELLS: [u8; 64] =
    *b"rnbqkbnrpppppppp--------------------------------PPPPPPPPRNBQKBNR";

/// Cursor square a white participant starts on (d2).
const HOME_WHITE: u8 = 51;
/// Cursor square a black participant starts on (e7).
const HOME_BLACK: u8 = 12;

/// The client's view of one match.
///
/// Cells hold the server's cell letters verbatim (`-` empty, letter cased
/// by color). The derived flags are recomputed from every decoded frame.
#[derive(Debug, Clone)]
pub struct BoardState {
    pub(crate) cells: [u8; 64],
    pub(crate) cursor: Option<u8>,
    pub(crate) picked: Option<u8>,
    /// The local player is party to the current game.
    pub includes_me: bool,
    /// It is the local player's move.
    pub my_move: bool,
    /// Which army is the local player's; White when only observing.
    pub my_side: Side,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            cells: STARTING_CELLS,
            cursor: Some(0),
            picked: None,
            includes_me: false,
            my_move: false,
            my_side: Side::White,
        }
    }
}

impl BoardState {
    /// All 64 cells, rank 8 first.
    pub fn cells(&self) -> &[u8; 64] {
        &self.cells
    }

    /// The cell letter at `index` (0..64).
    pub fn cell(&self, index: u8) -> u8 {
        self.cells[usize::from(index) & 63]
    }

    /// Active cursor square, if one is placed.
    pub fn cursor(&self) -> Option<u8> {
        self.cursor
    }

    /// Pending source square of a move being staged.
    pub fn picked(&self) -> Option<u8> {
        self.picked
    }

    /// Replaces the position wholesale (snapshot decoder only).
    pub fn load_cells(&mut self, cells: [u8; 64]) {
        self.cells = cells;
    }

    /// Prepares for a new match request: no participation, cursor parked
    /// until the first frame places it.
    pub fn reset_for_match(&mut self) {
        self.includes_me = false;
        self.cursor = None;
    }

    /// Recomputes participation, turn, and side from a decoded frame, and
    /// parks the cursor on the home square the first time the player turns
    /// out to be a participant.
    pub fn apply_frame(&mut self, frame: &GameFrame) {
        self.includes_me = frame.includes_me();
        self.my_move = frame.my_move();
        if !self.includes_me {
            self.my_side = Side::White;
            return;
        }
        self.my_side = if self.my_move == frame.white_to_move() {
            Side::White
        } else {
            Side::Black
        };
        if self.cursor.is_none() {
            let home = if self.my_side == Side::White {
                HOME_WHITE
            } else {
                HOME_BLACK
            };
            debug!(side = %self.my_side, home, "joined game, cursor parked");
            self.cursor = Some(home);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayString;

    fn frame(relation: &str, color: &str) -> GameFrame {
        let mut f = GameFrame::default();
        f.relation = ArrayString::from(relation).expect("fits");
        f.color_to_move = ArrayString::from(color).expect("fits");
        f
    }

    #[test]
    fn test_apply_frame_observer_defaults_to_white() {
        let mut board = BoardState::default();
        board.apply_frame(&frame("0", "B"));
        assert!(!board.includes_me);
        assert_eq!(board.my_side, Side::White);
    }

    #[test]
    fn test_apply_frame_my_move_as_white() {
        let mut board = BoardState::default();
        board.reset_for_match();
        board.apply_frame(&frame("1", "W"));
        assert!(board.includes_me);
        assert!(board.my_move);
        assert_eq!(board.my_side, Side::White);
        assert_eq!(board.cursor(), Some(51));
    }

    #[test]
    fn test_apply_frame_opponents_move_as_black() {
        let mut board = BoardState::default();
        board.reset_for_match();
        board.apply_frame(&frame("-1", "W"));
        assert!(board.includes_me);
        assert!(!board.my_move);
        assert_eq!(board.my_side, Side::Black);
        assert_eq!(board.cursor(), Some(12));
    }

    #[test]
    fn test_apply_frame_keeps_existing_cursor() {
        let mut board = BoardState::default();
        board.reset_for_match();
        board.apply_frame(&frame("1", "W"));
        board.cursor = Some(30);
        board.apply_frame(&frame("-1", "B"));
        assert_eq!(board.cursor(), Some(30), "later frames must not re-park");
    }

    #[test]
    fn test_starting_cells_shape() {
        let board = BoardState::default();
        assert_eq!(&board.cells()[..8], b"rnbqkbnr");
        assert_eq!(&board.cells()[56..], b"RNBQKBNR");
        assert_eq!(board.cell(32), b'-');
    }
}
