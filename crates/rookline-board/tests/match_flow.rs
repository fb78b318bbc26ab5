//! Integration tests: decoded snapshots driving board state and selection.

use rookline_board::{BoardInput, BoardState, MoveText, Selection};
use rookline_protocol::{parse_snapshot, Side};

fn snapshot_line(relation: &str, color: &str) -> Vec<u8> {
    format!(
        "<12> rnbqkbnr pppppppp -------- -------- -------- -------- PPPPPPPP \
RNBQKBNR {color} -1 1 1 1 1 0 7 GuestA GuestB {relation} 5 0 39 39 300 300 1 \
none (0:00) none 1 0 0\n"
    )
    .into_bytes()
}

fn board_from(relation: &str, color: &str) -> BoardState {
    let snapshot = parse_snapshot(&snapshot_line(relation, color)).expect("snapshot");
    let mut board = BoardState::default();
    board.reset_for_match();
    board.load_cells(snapshot.cells);
    board.apply_frame(&snapshot.frame);
    board
}

#[test]
fn test_white_participant_stages_a_pawn_move() {
    let mut board = board_from("1", "W");
    assert_eq!(board.my_side, Side::White);
    assert_eq!(board.cursor(), Some(51), "cursor parks on d2");

    // d2 → e2, pick it up, walk to e4, drop it.
    board.move_cursor(BoardInput::Right);
    assert!(matches!(board.select(), Selection::Picked(52)));
    board.move_cursor(BoardInput::Up);
    board.move_cursor(BoardInput::Up);
    assert_eq!(
        board.select(),
        Selection::Move(MoveText::from("e2-e4").expect("fits"))
    );
    assert_eq!(board.picked(), None, "selection resets after the command");
}

#[test]
fn test_black_participant_parks_on_their_side() {
    let board = board_from("-1", "W");
    assert_eq!(board.my_side, Side::Black);
    assert_eq!(board.cursor(), Some(12), "cursor parks on e7");
}

#[test]
fn test_observer_cannot_pick_pieces() {
    let mut board = board_from("0", "W");
    assert!(!board.includes_me);
    // Observers derive White; the cursor never parked, so selection is
    // inert either way.
    assert_eq!(board.select(), Selection::Ignored);
}

#[test]
fn test_next_frame_overwrites_cells_but_keeps_cursor() {
    let mut board = board_from("1", "W");
    board.move_cursor(BoardInput::Right);
    let cursor = board.cursor();

    let after_move = snapshot_line("-1", "B").to_vec();
    let snapshot = parse_snapshot(&after_move).expect("snapshot");
    board.load_cells(snapshot.cells);
    board.apply_frame(&snapshot.frame);

    assert_eq!(board.cursor(), cursor, "frames never re-park a live cursor");
    assert!(!board.my_move);
}
