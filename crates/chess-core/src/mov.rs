//! Move representation.

use crate::Square;
use std::fmt;
use thiserror::Error;

/// Which side of the board a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward the `h` file (O-O).
    Kingside,
    /// Toward the `a` file (O-O-O).
    Queenside,
}

impl CastleSide {
    /// Column of the rook that takes part in this castle.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column step from the king toward the rook.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// What a move does beyond relocating one piece.
///
/// Moves are identified by their squares alone; the kind is derived from the
/// board they are played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain relocation, with or without a capture on the destination.
    Normal,
    /// Pawn two-square advance from its starting row.
    DoubleStep,
    /// Diagonal pawn capture of a pawn that just double-stepped past.
    EnPassant,
    /// King moves two columns and the rook jumps over it.
    Castle(CastleSide),
    /// Pawn reaches the far row and becomes a queen.
    Promotion,
}

/// Errors produced when parsing coordinate move text such as `e2e4`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("expected four characters like 'e2e4', got '{0}'")]
    BadLength(String),

    #[error("invalid square '{0}'")]
    BadSquare(String),
}

/// A move from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    ///
    /// Promotion is always to a queen, so no promotion suffix is written.
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses a move from coordinate notation.
    ///
    /// A trailing `q` promotion suffix is accepted and ignored.
    pub fn from_uci(s: &str) -> Result<Self, MoveParseError> {
        let s = s.trim();
        let body = match s.len() {
            4 => s,
            5 if s.ends_with(['q', 'Q']) => &s[..4],
            _ => return Err(MoveParseError::BadLength(s.to_string())),
        };
        if !body.is_ascii() {
            return Err(MoveParseError::BadLength(s.to_string()));
        }
        let from = Square::from_algebraic(&body[0..2])
            .ok_or_else(|| MoveParseError::BadSquare(body[0..2].to_string()))?;
        let to = Square::from_algebraic(&body[2..4])
            .ok_or_else(|| MoveParseError::BadSquare(body[2..4].to_string()))?;
        Ok(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
