//! FIDE chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 piece placement with the pending en-passant target
//! - [`GameState`] - the board plus side to move and the game outcome
//! - Pseudo-legality, check detection and full legality queries
//! - Move application with castling, en passant and queen promotion
//! - Checkmate and stalemate detection
//! - Perft for validating the rules against reference counts
//!
//! # Architecture
//!
//! Legality is decided by playing a candidate move on the board in place,
//! asking whether the mover's king is attacked, and restoring the touched
//! squares. Every query that does this takes `&mut Board`, so no other code
//! can observe the transient position.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_rules::{GameState, Outcome};
//!
//! let mut game = GameState::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert_eq!(game.legal_moves().len(), 20);
//! assert!(game.apply_move(e2, e4));
//! assert_eq!(game.turn(), Color::Black);
//! assert_eq!(game.outcome(), Outcome::InProgress);
//! println!("Position after 1.e4: {}", game.to_fen());
//! ```

mod attacks;
mod board;
mod game;
pub mod legal;
pub mod perft;
pub mod pseudo;
mod simulate;

pub use attacks::{is_in_check, is_square_attacked};
pub use board::{Board, EnPassant};
pub use game::{GameError, GameState, Outcome};
pub use legal::{
    apply_move, has_any_legal_move, is_legal, legal_destinations, legal_moves, try_apply, MoveList,
};
pub use perft::{perft, perft_divide};
pub use pseudo::{classify, is_pseudo_legal};
