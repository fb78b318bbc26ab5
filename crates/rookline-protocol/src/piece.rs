//! Piece and side types derived from board-cell letters.
//!
//! The server encodes each board cell as one ASCII byte: `-` for an empty
//! square, a piece letter otherwise, with case carrying the color.

use std::fmt;

/// Which army a piece (or player) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Label used in the status panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece as it sits on a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

/// Decodes one board-cell byte. `-` and unknown letters are empty.
pub fn piece_from_cell(cell: u8) -> Option<Piece> {
    let side = if cell.is_ascii_uppercase() {
        Side::White
    } else {
        Side::Black
    };
    let kind = match cell.to_ascii_lowercase() {
        b'p' => PieceKind::Pawn,
        b'r' => PieceKind::Rook,
        b'n' => PieceKind::Knight,
        b'b' => PieceKind::Bishop,
        b'q' => PieceKind::Queen,
        b'k' => PieceKind::King,
        _ => return None,
    };
    Some(Piece { kind, side })
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_cell_empty_square() {
        assert_eq!(piece_from_cell(b'-'), None);
    }

    #[test]
    fn test_piece_from_cell_case_selects_side() {
        let white = piece_from_cell(b'Q').expect("piece");
        assert_eq!(white.side, Side::White);
        assert_eq!(white.kind, PieceKind::Queen);

        let black = piece_from_cell(b'q').expect("piece");
        assert_eq!(black.side, Side::Black);
        assert_eq!(black.kind, PieceKind::Queen);
    }

    #[test]
    fn test_piece_from_cell_all_letters() {
        for (letter, kind) in [
            (b'p', PieceKind::Pawn),
            (b'r', PieceKind::Rook),
            (b'n', PieceKind::Knight),
            (b'b', PieceKind::Bishop),
            (b'k', PieceKind::King),
        ] {
            assert_eq!(piece_from_cell(letter).expect("piece").kind, kind);
        }
    }

    #[test]
    fn test_piece_from_cell_unknown_letter_is_empty() {
        assert_eq!(piece_from_cell(b'x'), None);
        assert_eq!(piece_from_cell(b' '), None);
    }

    #[test]
    fn test_side_opposite_and_label() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.opposite(), Side::White);
        assert_eq!(Side::White.label(), "White");
        assert_eq!(Side::Black.to_string(), "Black");
    }
}
