//! Scoped hypothetical moves.
//!
//! A [`Simulation`] plays a move on the board in place and puts every touched
//! square back when it goes out of scope, on every exit path. While it is
//! alive it holds the only borrow of the board, so nothing else can observe
//! the intermediate position.

use std::ops::Deref;

use chess_core::{Piece, Square};

use crate::pseudo::en_passant_victim;
use crate::Board;

pub(crate) struct Simulation<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: Option<Piece>,
    replaced: Option<Piece>,
    captured: Option<(Square, Option<Piece>)>,
}

impl Board {
    /// Relocates the piece on `from` to `to`, removing an en-passant victim if
    /// the move is such a capture. Side effects beyond piece placement
    /// (promotion, rook relocation, moved flags, en-passant target) are not
    /// simulated: none of them can change whether the mover's king is attacked.
    pub(crate) fn simulate(&mut self, from: Square, to: Square) -> Simulation<'_> {
        let captured = en_passant_victim(self, from, to).map(|sq| (sq, self.take(sq)));
        let moved = self.take(from);
        let replaced = self.piece_at(to);
        self.set(to, moved);

        Simulation {
            board: self,
            from,
            to,
            moved,
            replaced,
            captured,
        }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.set(self.to, self.replaced);
        self.board.set(self.from, self.moved);
        if let Some((sq, piece)) = self.captured {
            self.board.set(sq, piece);
        }
    }
}
