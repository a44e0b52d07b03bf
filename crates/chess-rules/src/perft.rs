//! Perft (performance test) for validating the legality rules.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth, which
//! can be compared against published values. Every promotion here is to a
//! queen, so only reference positions without promotions in reach give the
//! published numbers.

use chess_core::Color;

use crate::legal::{legal_moves, try_apply};
use crate::Board;

/// Counts the leaf nodes at `depth` with `to_move` to play first.
pub fn perft(board: &Board, to_move: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut scratch = *board;
    let moves = legal_moves(&mut scratch, to_move);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = *board;
        if try_apply(&mut next, m.from, m.to).is_some() {
            nodes += perft(&next, to_move.opposite(), depth - 1);
        }
    }
    nodes
}

/// Perft with divide: the node count below each root move, sorted by UCI.
pub fn perft_divide(board: &Board, to_move: Color, depth: u32) -> Vec<(String, u64)> {
    let mut scratch = *board;
    let moves = legal_moves(&mut scratch, to_move);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = *board;
        if try_apply(&mut next, m.from, m.to).is_none() {
            continue;
        }
        let nodes = if depth > 1 {
            perft(&next, to_move.opposite(), depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
