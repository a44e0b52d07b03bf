//! Check detection.

use chess_core::{Color, Square};

use crate::pseudo::reaches;
use crate::Board;

/// Returns true if any piece of color `by` attacks `target`.
///
/// Pawns attack diagonally forward regardless of what stands on the square;
/// every other piece attacks exactly the squares it could move to.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| from != target && reaches(board, piece, from, target))
}

/// Returns true if the king of `color` stands on an attacked square.
///
/// A board without a king of that color breaks the engine's invariants; debug
/// builds panic, release builds report "not in check".
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => {
            debug_assert!(false, "no {} king on the board", color);
            false
        }
    }
}
