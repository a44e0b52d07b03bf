//! Pseudo-legal move checking.
//!
//! A move is pseudo-legal when it fits the moving piece's geometry and the
//! occupancy of the board, ignoring whether it leaves the mover's own king
//! attacked. The one exception is castling, whose preconditions include the
//! king not being in check and not passing through an attacked square.

use chess_core::{CastleSide, Color, MoveKind, Piece, PieceKind, Square};
use tracing::trace;

use crate::attacks::is_in_check;
use crate::Board;

/// Returns true if `from -> to` is pseudo-legal on the current board.
///
/// Takes the board mutably because the castling check plays the king's
/// transit step hypothetically; the board is unchanged on return.
pub fn is_pseudo_legal(board: &mut Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if board.piece_at(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece, from, to),
        PieceKind::King if castle_side(from, to).is_some() => castling_allowed(board, piece, from, to),
        _ => reaches(board, piece, from, to),
    }
}

/// Returns true if `piece` standing on `from` attacks `to`.
///
/// This is the capture pattern shared by move checking and the check oracle.
/// Pawns attack one diagonal step forward whether or not the square is
/// occupied; kings attack their eight neighbours only; sliders need a clear
/// line. Colors of whatever stands on `to` are not considered.
pub(crate) fn reaches(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let (adr, adc) = (dr.abs(), dc.abs());
    let shape = match piece.kind {
        PieceKind::Pawn => dr == piece.color.pawn_direction() && adc == 1,
        PieceKind::Knight => matches!((adr, adc), (1, 2) | (2, 1)),
        PieceKind::Bishop => adr == adc && adr != 0,
        PieceKind::Rook => (adr == 0) != (adc == 0),
        PieceKind::Queen => (adr == adc || adr == 0 || adc == 0) && (adr, adc) != (0, 0),
        PieceKind::King => adr <= 1 && adc <= 1 && (adr, adc) != (0, 0),
    };
    shape && (!piece.kind.is_slider() || path_clear(board, from, to))
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The two squares must share a row, column or diagonal.
pub(crate) fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    debug_assert!(
        dr == 0 || dc == 0 || dr.abs() == dc.abs(),
        "{} and {} are not on a line",
        from,
        to
    );
    let (step_r, step_c) = (dr.signum(), dc.signum());

    let mut current = from.offset(step_r, step_c);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_r, step_c);
    }
    true
}

/// If `from -> to` is an en-passant capture, returns the square of the pawn
/// it removes.
///
/// Requires a pawn moving one diagonal step forward onto the current target
/// square, a target laid down by the other color, and an opposing pawn
/// actually standing beside the mover, on the destination's column. The last
/// condition guards against a stale target.
pub(crate) fn en_passant_victim(board: &Board, from: Square, to: Square) -> Option<Square> {
    let mover = board.piece_at(from)?;
    if mover.kind != PieceKind::Pawn {
        return None;
    }
    let ep = board.en_passant()?;
    if ep.square != to || ep.owner == mover.color || !board.is_empty(to) {
        return None;
    }
    let (dr, dc) = delta(from, to);
    if dr != mover.color.pawn_direction() || dc.abs() != 1 {
        return None;
    }

    let victim = Square::new(from.row(), to.col())?;
    board
        .piece_at(victim)
        .filter(|p| p.is(PieceKind::Pawn, mover.color.opposite()))
        .map(|_| victim)
}

/// Classifies a pseudo-legal move by the side effects it will have.
///
/// A pawn capture landing on the far row is a [`MoveKind::Promotion`].
pub fn classify(board: &Board, from: Square, to: Square) -> MoveKind {
    let Some(piece) = board.piece_at(from) else {
        return MoveKind::Normal;
    };
    match piece.kind {
        PieceKind::Pawn => {
            if en_passant_victim(board, from, to).is_some() {
                MoveKind::EnPassant
            } else if to.row() == piece.color.promotion_rank() {
                MoveKind::Promotion
            } else if delta(from, to).0.abs() == 2 {
                MoveKind::DoubleStep
            } else {
                MoveKind::Normal
            }
        }
        PieceKind::King => castle_side(from, to).map_or(MoveKind::Normal, MoveKind::Castle),
        _ => MoveKind::Normal,
    }
}

fn pawn_move(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    let dir = pawn.color.pawn_direction();
    let (dr, dc) = delta(from, to);

    if dc == 0 {
        if dr == dir {
            return board.is_empty(to);
        }
        if dr == 2 * dir && !pawn.has_moved {
            return from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid)) && board.is_empty(to);
        }
        return false;
    }

    if !reaches(board, pawn, from, to) {
        return false;
    }
    // Own pieces were rejected by the caller, so any occupant is an enemy.
    !board.is_empty(to) || en_passant_victim(board, from, to).is_some()
}

/// Castling side for a two-column king move along its row.
fn castle_side(from: Square, to: Square) -> Option<CastleSide> {
    match delta(from, to) {
        (0, 2) => Some(CastleSide::Kingside),
        (0, -2) => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Whether the king on `from` may castle to `to`.
///
/// The destination square itself is not tested for attacks here: the legality
/// check applied to every move already rejects a king landing in check.
fn castling_allowed(board: &mut Board, king: Piece, from: Square, to: Square) -> bool {
    let Some(side) = castle_side(from, to) else {
        return false;
    };
    if king.has_moved {
        trace!(%from, %to, "castling refused: king has moved");
        return false;
    }

    let Some(rook_sq) = Square::new(from.row(), side.rook_col()) else {
        return false;
    };
    let rook_ready = board
        .piece_at(rook_sq)
        .is_some_and(|rook| rook.is(PieceKind::Rook, king.color) && !rook.has_moved);
    if !rook_ready {
        trace!(%from, %to, "castling refused: no unmoved rook on {}", rook_sq);
        return false;
    }

    if !path_clear(board, from, rook_sq) {
        trace!(%from, %to, "castling refused: path to rook is blocked");
        return false;
    }

    if is_in_check(board, king.color) {
        trace!(%from, %to, "castling refused: king is in check");
        return false;
    }

    let Some(transit) = from.offset(0, side.step()) else {
        return false;
    };
    if transit_attacked(board, king.color, from, transit) {
        trace!(%from, %to, "castling refused: {} is attacked", transit);
        return false;
    }

    true
}

fn transit_attacked(board: &mut Board, color: Color, from: Square, transit: Square) -> bool {
    let step = board.simulate(from, transit);
    is_in_check(&step, color)
}

#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pseudo(fen: &str, from: &str, to: &str) -> bool {
        let mut board = Board::from_fen(fen).unwrap();
        is_pseudo_legal(&mut board, sq(from), sq(to))
    }

    const START: &str = chess_core::FenParser::STARTPOS;

    #[test]
    fn pawn_pushes() {
        assert!(pseudo(START, "e2", "e3"));
        assert!(pseudo(START, "e2", "e4"));
        assert!(!pseudo(START, "e2", "e5"));
        assert!(!pseudo(START, "e2", "e1"));
        assert!(pseudo(START, "d7", "d5"));
        assert!(!pseudo(START, "d7", "d8"));
        // Moved pawns lose the double step
        assert!(!pseudo("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", "e3", "e5"));
    }

    #[test]
    fn pawn_blocked() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        assert!(!pseudo(fen, "e2", "e3"));
        assert!(!pseudo(fen, "e2", "e4"));
        // Blocked on the destination only
        assert!(!pseudo("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2", "e4"));
    }

    #[test]
    fn pawn_captures() {
        let fen = "4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1";
        assert!(pseudo(fen, "e2", "d3"));
        // Own piece on the diagonal
        assert!(!pseudo(fen, "e2", "f3"));
        // Empty diagonal without a target
        assert!(!pseudo(START, "e2", "d3"));
        // Backward diagonal
        assert!(!pseudo("4k3/8/8/8/4P3/3p4/8/4K3 w - - 0 1", "e4", "d3"));
    }

    #[test]
    fn en_passant_requires_target_and_victim() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert!(pseudo(fen, "e5", "d6"));
        // No target
        assert!(!pseudo("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1", "e5", "d6"));
        // Stale target with no pawn beside the mover
        assert!(!pseudo("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1", "e5", "d6"));
        // Target laid by the mover's own color
        assert!(!pseudo("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1", "e5", "d6"));
    }

    #[test]
    fn en_passant_victim_square() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(en_passant_victim(&board, sq("e5"), sq("d6")), Some(sq("d5")));
        assert_eq!(en_passant_victim(&board, sq("e5"), sq("e6")), None);
    }

    #[test]
    fn knight_jumps() {
        assert!(pseudo(START, "g1", "f3"));
        assert!(pseudo(START, "g1", "h3"));
        assert!(!pseudo(START, "g1", "e2"));
        assert!(!pseudo(START, "g1", "g3"));
    }

    #[test]
    fn rook_needs_clear_line() {
        let fen = "4k3/8/8/8/R2p3P/8/8/4K3 w - - 0 1";
        assert!(pseudo(fen, "a4", "c4"));
        assert!(pseudo(fen, "a4", "d4"));
        // Blocked horizontally as well as vertically
        assert!(!pseudo(fen, "a4", "e4"));
        assert!(pseudo(fen, "a4", "a8"));
        assert!(!pseudo(fen, "a4", "b5"));
    }

    #[test]
    fn bishop_and_queen_lines() {
        let fen = "4k3/8/8/8/3Q4/8/1B6/4K3 w - - 0 1";
        assert!(pseudo(fen, "b2", "c3"));
        assert!(!pseudo(fen, "b2", "e5"));
        assert!(!pseudo(fen, "b2", "b4"));
        assert!(pseudo(fen, "d4", "h8"));
        assert!(pseudo(fen, "d4", "d8"));
        assert!(pseudo(fen, "d4", "a4"));
        assert!(!pseudo(fen, "d4", "e6"));
    }

    #[test]
    fn only_sliders_are_blocked() {
        // The c3 knight blocks the a1-d4 diagonal and the c-file
        let board = Board::from_fen("4k3/8/8/8/8/2N5/8/B1R1K3 w - - 0 1").unwrap();
        let white = |kind| Piece::new(kind, Color::White);

        assert!(!reaches(&board, white(PieceKind::Bishop), Square::A1, sq("d4")));
        assert!(!reaches(&board, white(PieceKind::Queen), Square::A1, sq("d4")));
        assert!(reaches(&board, white(PieceKind::Bishop), Square::A1, sq("b2")));
        assert!(!reaches(&board, white(PieceKind::Rook), Square::C1, sq("c5")));
        assert!(reaches(&board, white(PieceKind::Rook), Square::C1, sq("c2")));
        // A knight on b1 hops past the c1 rook
        assert!(reaches(&board, white(PieceKind::Knight), sq("b1"), sq("d2")));
    }

    #[test]
    fn king_steps() {
        let fen = "4k3/8/8/8/4K3/8/8/8 w - - 0 1";
        for to in ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"] {
            assert!(pseudo(fen, "e4", to), "e4{}", to);
        }
        assert!(!pseudo(fen, "e4", "e6"));
        assert!(!pseudo(fen, "e4", "g4"));
    }

    #[test]
    fn own_piece_and_null_moves_rejected() {
        assert!(!pseudo(START, "d1", "d2"));
        assert!(!pseudo(START, "e2", "e2"));
        assert!(!pseudo(START, "e4", "e5"));
    }

    #[test]
    fn castling_shapes() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert!(pseudo(fen, "e1", "g1"));
        assert!(pseudo(fen, "e1", "c1"));
        assert!(pseudo(fen, "e8", "g8"));
        assert!(pseudo(fen, "e8", "c8"));
        // Three columns is not a castle
        assert!(!pseudo(fen, "e1", "b1"));
    }

    #[test]
    fn classify_moves() {
        let board = Board::from_fen("r3k2r/1P6/8/3pP3/8/8/4P3/R3K2R w KQkq d6 0 1").unwrap();
        assert_eq!(classify(&board, sq("e2"), sq("e4")), MoveKind::DoubleStep);
        assert_eq!(classify(&board, sq("e2"), sq("e3")), MoveKind::Normal);
        assert_eq!(classify(&board, sq("e5"), sq("d6")), MoveKind::EnPassant);
        assert_eq!(classify(&board, sq("b7"), sq("b8")), MoveKind::Promotion);
        assert_eq!(classify(&board, sq("b7"), sq("a8")), MoveKind::Promotion);
        assert_eq!(
            classify(&board, Square::E1, Square::G1),
            MoveKind::Castle(CastleSide::Kingside)
        );
        assert_eq!(
            classify(&board, Square::E1, Square::C1),
            MoveKind::Castle(CastleSide::Queenside)
        );
        assert_eq!(classify(&board, Square::A1, sq("a2")), MoveKind::Normal);
    }

    #[test]
    fn board_unchanged_by_castling_check() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = board;
        assert!(is_pseudo_legal(&mut board, Square::E1, Square::G1));
        assert_eq!(board, before);
    }
}
