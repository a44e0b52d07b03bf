//! Legal move evaluation and move application.
//!
//! A move is legal when it is pseudo-legal and, once played, does not leave
//! the mover's own king attacked. The second half is answered by playing the
//! move hypothetically and undoing it before returning.

use chess_core::{Color, Move, MoveKind, PieceKind, Square};
use tracing::debug;

use crate::attacks::is_in_check;
use crate::board::EnPassant;
use crate::pseudo::{classify, en_passant_victim, is_pseudo_legal};
use crate::Board;

/// Legal moves of one side, in the order they were found.
///
/// Derefs to `[Move]` for indexing, `len` and `iter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    /// Whether a move between these two squares was found.
    pub fn includes(&self, from: Square, to: Square) -> bool {
        self.0.iter().any(|m| m.from == from && m.to == to)
    }
}

impl std::ops::Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns true if `from -> to` is legal for whichever color stands on `from`.
///
/// The board is identical before and after the call.
pub fn is_legal(board: &mut Board, from: Square, to: Square) -> bool {
    if !is_pseudo_legal(board, from, to) {
        return false;
    }
    let Some(mover) = board.piece_at(from).map(|p| p.color) else {
        return false;
    };
    let played = board.simulate(from, to);
    !is_in_check(&played, mover)
}

/// Returns true if `color` has at least one legal move.
pub fn has_any_legal_move(board: &mut Board, color: Color) -> bool {
    for from in Square::all() {
        if !owned_by(board, from, color) {
            continue;
        }
        for to in Square::all() {
            if is_legal(board, from, to) {
                return true;
            }
        }
    }
    false
}

/// Enumerates every legal move of `color`, sources in board order.
pub fn legal_moves(board: &mut Board, color: Color) -> MoveList {
    let mut moves = Vec::new();
    for from in Square::all() {
        if !owned_by(board, from, color) {
            continue;
        }
        for to in Square::all() {
            if is_legal(board, from, to) {
                moves.push(Move::new(from, to));
            }
        }
    }
    MoveList(moves)
}

/// Returns every square the piece on `from` may legally move to.
pub fn legal_destinations(board: &mut Board, from: Square) -> Vec<Square> {
    let mut targets = Vec::new();
    for to in Square::all() {
        if is_legal(board, from, to) {
            targets.push(to);
        }
    }
    targets
}

/// Plays `from -> to` if it is legal. Returns false without touching the board
/// otherwise.
pub fn apply_move(board: &mut Board, from: Square, to: Square) -> bool {
    try_apply(board, from, to).is_some()
}

/// Plays `from -> to` if it is legal and reports what kind of move it was.
///
/// Side effects, in order: the en-passant victim is removed; the en-passant
/// target is replaced (double step) or cleared (anything else); a pawn on the
/// far row becomes a queen; a castling rook hops next to the king; finally the
/// mover is marked as moved and relocated.
pub fn try_apply(board: &mut Board, from: Square, to: Square) -> Option<MoveKind> {
    if !is_legal(board, from, to) {
        debug!(%from, %to, "rejected illegal move");
        return None;
    }
    let mut piece = board.piece_at(from)?;
    let kind = classify(board, from, to);

    if kind == MoveKind::EnPassant {
        if let Some(victim) = en_passant_victim(board, from, to) {
            board.take(victim);
        }
    }

    let target = match kind {
        MoveKind::DoubleStep => from
            .offset(piece.color.pawn_direction(), 0)
            .map(|square| EnPassant {
                square,
                owner: piece.color,
            }),
        _ => None,
    };
    board.set_en_passant(target);

    if kind == MoveKind::Promotion {
        piece.kind = PieceKind::Queen;
    }

    if let MoveKind::Castle(side) = kind {
        let rook_from = Square::new(from.row(), side.rook_col());
        let rook_to = to.offset(0, -side.step());
        if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
            if let Some(rook) = board.take(rook_from) {
                board.put(rook_to, rook.moved());
            }
        }
    }

    board.take(from);
    board.put(to, piece.moved());

    debug!(%from, %to, ?kind, "applied {} move", piece.color);
    Some(kind)
}

#[inline]
fn owned_by(board: &Board, sq: Square, color: Color) -> bool {
    board.piece_at(sq).is_some_and(|p| p.color == color)
}
