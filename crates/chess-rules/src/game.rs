//! Game management: the board plus whose turn it is and how the game stands.
//!
//! [`GameState`] is the single owned aggregate a front-end holds. Every query
//! that needs to play moves hypothetically takes `&mut self`, which is what
//! keeps the transient simulated positions invisible to anyone else.

use std::fmt;

use chess_core::{Color, FenError, FenParser, MoveKind, Piece, Square};
use thiserror::Error;
use tracing::{debug, info};

use crate::attacks::is_in_check;
use crate::legal::{self, MoveList};
use crate::{Board, EnPassant};

/// How the game stands after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move has at least one legal move.
    InProgress,
    /// The side to move is in check with no legal reply.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal move.
    Stalemate,
}

impl Outcome {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Checkmate { winner } => write!(f, "Checkmate! {} wins", winner),
            Outcome::Stalemate => write!(f, "Stalemate!"),
        }
    }
}

/// Reasons a move is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game has already ended")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} does not belong to {to_move}, who is to move")]
    WrongTurn { square: Square, to_move: Color },

    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    outcome: Outcome,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::startpos(),
            turn: Color::White,
            outcome: Outcome::InProgress,
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// The outcome is evaluated immediately, so a position that is already
    /// mate or stalemate yields a finished game.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let turn = match parsed.active_color {
            'b' => Color::Black,
            _ => Color::White,
        };
        let mut game = GameState {
            board: Board::from_parsed(&parsed),
            turn,
            outcome: Outcome::InProgress,
        };
        game.outcome = game.evaluate();
        Ok(game)
    }

    /// Restarts from the standard position with White to move.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Color::White;
        self.outcome = Outcome::InProgress;
        debug!("game reset");
    }

    /// Returns the board for rendering.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Returns the color to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the outcome as of the last move.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the pending en-passant target, if the last move was a double step.
    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.board.en_passant()
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.turn)
    }

    /// Returns true once the game has reached checkmate or stalemate.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Returns true if `from -> to` is legal for the piece standing on `from`,
    /// regardless of whose turn it is. The board is unchanged afterwards.
    pub fn is_legal(&mut self, from: Square, to: Square) -> bool {
        legal::is_legal(&mut self.board, from, to)
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_any_legal_move(&mut self, color: Color) -> bool {
        legal::has_any_legal_move(&mut self.board, color)
    }

    /// Returns true if `color` is in check with no legal move.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Returns true if `color` is not in check but has no legal move.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&mut self) -> MoveList {
        legal::legal_moves(&mut self.board, self.turn)
    }

    /// Squares the piece on `from` may move to. Empty once the game is over
    /// or when the piece does not belong to the side to move.
    pub fn legal_destinations(&mut self, from: Square) -> Vec<Square> {
        let ours = self.board.piece_at(from).is_some_and(|p| p.color == self.turn);
        if self.is_over() || !ours {
            return Vec::new();
        }
        legal::legal_destinations(&mut self.board, from)
    }

    /// Plays a move for the side to move. Returns false, changing nothing,
    /// when the move is refused for any reason.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        self.play(from, to).is_ok()
    }

    /// Plays a move for the side to move, passes the turn and re-evaluates
    /// the outcome.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveKind, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.turn {
            return Err(GameError::WrongTurn {
                square: from,
                to_move: self.turn,
            });
        }

        let kind = legal::try_apply(&mut self.board, from, to)
            .ok_or(GameError::IllegalMove { from, to })?;

        self.turn = self.turn.opposite();
        self.outcome = self.evaluate();
        if self.outcome.is_terminal() {
            info!(outcome = %self.outcome, "game over");
        }
        Ok(kind)
    }

    /// Classifies the position for the side to move.
    fn evaluate(&mut self) -> Outcome {
        let side = self.turn;
        if self.has_any_legal_move(side) {
            Outcome::InProgress
        } else if self.is_in_check(side) {
            Outcome::Checkmate {
                winner: side.opposite(),
            }
        } else {
            Outcome::Stalemate
        }
    }

    /// One-line status for display: outcome, or whose move and whether in check.
    pub fn status_line(&self) -> String {
        match self.outcome {
            Outcome::InProgress if self.in_check() => {
                format!("{} to move (check)", self.turn)
            }
            Outcome::InProgress => format!("{} to move", self.turn),
            terminal => terminal.to_string(),
        }
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.board.to_fen(self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(game: &mut GameState, uci: &str) -> Result<MoveKind, GameError> {
        let m = chess_core::Move::from_uci(uci).unwrap();
        game.play(m.from, m.to)
    }

    #[test]
    fn new_game() {
        let mut game = GameState::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert!(!game.is_in_check(Color::White));
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn turn_alternates() {
        let mut game = GameState::new();
        play(&mut game, "e2e4").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(
            play(&mut game, "d2d4"),
            Err(GameError::WrongTurn {
                square: sq("d2"),
                to_move: Color::Black
            })
        );
        play(&mut game, "e7e5").unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.en_passant().map(|ep| ep.square), Some(sq("e6")));
    }

    #[test]
    fn refused_moves() {
        let mut game = GameState::new();
        assert_eq!(play(&mut game, "e4e5"), Err(GameError::EmptySquare(sq("e4"))));
        assert_eq!(
            play(&mut game, "e2e5"),
            Err(GameError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert!(!game.apply_move(sq("e2"), sq("e5")));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn fools_mate() {
        let mut game = GameState::new();
        for m in ["f2f3", "e7e5", "g2g4"] {
            play(&mut game, m).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::InProgress);
        play(&mut game, "d8h4").unwrap();
        assert_eq!(
            game.outcome(),
            Outcome::Checkmate {
                winner: Color::Black
            }
        );
        assert!(game.is_checkmate(Color::White));
        assert_eq!(game.status_line(), "Checkmate! Black wins");
        assert_eq!(play(&mut game, "a2a3"), Err(GameError::GameOver));
    }

    #[test]
    fn stalemate_from_fen() {
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.outcome(), Outcome::Stalemate);
        assert!(game.is_stalemate(Color::Black));
        assert!(!game.is_in_check(Color::Black));
        assert!(!game.has_any_legal_move(Color::Black));
        assert_eq!(game.status_line(), "Stalemate!");
    }

    #[test]
    fn status_reports_check() {
        let mut game = GameState::new();
        for m in ["e2e4", "f7f6", "d2d4", "g7g5"] {
            play(&mut game, m).unwrap();
        }
        assert_eq!(game.status_line(), "White to move");
        play(&mut game, "d1h5").unwrap();
        assert_eq!(
            game.outcome(),
            Outcome::Checkmate {
                winner: Color::White
            }
        );

        let mut game = GameState::new();
        for m in ["e2e4", "d7d5", "f1b5"] {
            play(&mut game, m).unwrap();
        }
        assert!(game.in_check());
        assert_eq!(game.status_line(), "Black to move (check)");
    }

    #[test]
    fn reset_after_game_over() {
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_over());
        game.reset();
        assert_eq!(game, GameState::new());
        assert!(game.apply_move(sq("e2"), sq("e4")));
    }

    #[test]
    fn legal_destinations_respect_turn() {
        let mut game = GameState::new();
        assert_eq!(game.legal_destinations(sq("g8")), Vec::<Square>::new());
        let mut knight = game.legal_destinations(sq("g1"));
        knight.sort();
        assert_eq!(knight, vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn is_legal_is_turn_agnostic() {
        let mut game = GameState::new();
        assert!(game.is_legal(sq("e7"), sq("e5")));
        assert!(game.is_legal(sq("e2"), sq("e4")));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn error_display() {
        let err = GameError::IllegalMove {
            from: sq("e2"),
            to: sq("e5"),
        };
        assert_eq!(err.to_string(), "illegal move: e2e5");
        assert_eq!(GameError::GameOver.to_string(), "game has already ended");
    }
}
