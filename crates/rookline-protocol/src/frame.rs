//! Snapshot-frame decoding.
//!
//! Every position update arrives as one fixed-format line: the marker, an
//! optional illegal-move flag, eight space-delimited ranks, then the match
//! metadata fields in a fixed order. The whole line is expected inside one
//! delivered chunk — a frame cut by the delivery boundary is abandoned, not
//! reassembled.

use arrayvec::ArrayString;

use crate::markers::SNAPSHOT;
use crate::token::copy_field;
use crate::ProtocolError;

/// Metadata fields of one decoded snapshot line.
///
/// Every field keeps the server's ASCII text at its fixed maximum width;
/// longer input is capped during decoding. Interpretation (who is to move,
/// which side is local) is derived on demand rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFrame {
    /// `W` or `B`.
    pub color_to_move: ArrayString<1>,
    /// File of a double pawn push, `-1` if none.
    pub double_pawn_push: ArrayString<2>,
    pub white_castle_long: ArrayString<1>,
    pub white_castle_short: ArrayString<1>,
    pub black_castle_long: ArrayString<1>,
    pub black_castle_short: ArrayString<1>,
    /// Half-moves since the last irreversible move.
    pub moves_since_irreversible: ArrayString<3>,
    pub game_number: ArrayString<6>,
    pub white_name: ArrayString<18>,
    pub black_name: ArrayString<18>,
    /// Relation of this client to the game; `1` in either character means
    /// the local player is a participant, `1` first means it is their move.
    pub relation: ArrayString<2>,
    pub initial_time: ArrayString<3>,
    pub time_increment: ArrayString<3>,
    pub white_strength: ArrayString<3>,
    pub black_strength: ArrayString<3>,
    pub white_remaining: ArrayString<3>,
    pub black_remaining: ArrayString<3>,
    pub move_number: ArrayString<3>,
    /// Last move in the server's verbose notation, `none` before move one.
    pub previous_move: ArrayString<7>,
}

impl GameFrame {
    /// `true` when the local player is party to this game.
    pub fn includes_me(&self) -> bool {
        let r = self.relation.as_bytes();
        r.first() == Some(&b'1') || r.get(1) == Some(&b'1')
    }

    /// `true` when it is the local player's move.
    pub fn my_move(&self) -> bool {
        self.relation.as_bytes().first() == Some(&b'1')
    }

    /// `true` when White is to move.
    pub fn white_to_move(&self) -> bool {
        self.color_to_move.as_bytes().first() == Some(&b'W')
    }
}

/// One fully decoded snapshot: the 64 board cells (rank 8 first, one ASCII
/// byte per cell), the metadata frame, and how many input bytes the line's
/// fixed part consumed.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cells: [u8; 64],
    pub frame: GameFrame,
    pub consumed: usize,
}

/// Decodes a snapshot from `input`, which must begin at the marker.
///
/// # Errors
/// - [`ProtocolError::IllegalMove`] when the line carries the illegal-move
///   flag; nothing was decoded and the caller should request a refresh.
/// - [`ProtocolError::TruncatedFrame`] when the chunk ends inside the fixed
///   fields; same recovery.
pub fn parse_snapshot(input: &[u8]) -> Result<Snapshot, ProtocolError> {
    let mut pos = SNAPSHOT.len() + 1;

    match input.get(pos) {
        None => return Err(ProtocolError::TruncatedFrame),
        Some(&b'I') => return Err(ProtocolError::IllegalMove),
        Some(_) => {}
    }

    let mut cells = [0u8; 64];
    for rank in 0..8 {
        let row = input
            .get(pos..pos + 8)
            .ok_or(ProtocolError::TruncatedFrame)?;
        cells[rank * 8..rank * 8 + 8].copy_from_slice(row);
        pos += 9;
    }

    let frame = GameFrame {
        color_to_move: copy_field(input, &mut pos)?,
        double_pawn_push: copy_field(input, &mut pos)?,
        white_castle_long: copy_field(input, &mut pos)?,
        white_castle_short: copy_field(input, &mut pos)?,
        black_castle_long: copy_field(input, &mut pos)?,
        black_castle_short: copy_field(input, &mut pos)?,
        moves_since_irreversible: copy_field(input, &mut pos)?,
        game_number: copy_field(input, &mut pos)?,
        white_name: copy_field(input, &mut pos)?,
        black_name: copy_field(input, &mut pos)?,
        relation: copy_field(input, &mut pos)?,
        initial_time: copy_field(input, &mut pos)?,
        time_increment: copy_field(input, &mut pos)?,
        white_strength: copy_field(input, &mut pos)?,
        black_strength: copy_field(input, &mut pos)?,
        white_remaining: copy_field(input, &mut pos)?,
        black_remaining: copy_field(input, &mut pos)?,
        move_number: copy_field(input, &mut pos)?,
        previous_move: copy_field(input, &mut pos)?,
    };

    Ok(Snapshot {
        cells,
        frame,
        consumed: pos,
    })
}

// =========================================================================
// Tests
// =========================================================================
