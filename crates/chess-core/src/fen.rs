//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Used to set up and inspect positions. Only the placement field is
//! mandatory; missing trailing fields take their starting-position defaults.

use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN record, checked for shape but not interpreted.
///
/// The rules engine turns these into its own board representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Ranks 8 down to 1, separated by `/`.
    pub piece_placement: String,
    /// `'w'` or `'b'`.
    pub active_color: char,
    /// Any of `KQkq`, or `-`.
    pub castling: String,
    /// Target square such as `e3`, or `-`.
    pub en_passant: String,
    /// Halfmove clock. Parsed for compatibility; the engine keeps no clock.
    pub halfmove_clock: u32,
    /// Fullmove number. Parsed for compatibility.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string of one to six whitespace-separated fields.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(1..=6).contains(&fields.len()) {
            return Err(FenError::InvalidPartCount(fields.len()));
        }
        let field = |i: usize, default: &'static str| fields.get(i).copied().unwrap_or(default);

        let piece_placement = check_placement(fields[0])?;

        let active_color = match field(1, "w") {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = check_castling(field(2, "-"))?;
        let en_passant = check_en_passant(field(3, "-"))?;

        let halfmove_clock = field(4, "0")
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock(field(4, "0").to_string()))?;
        let fullmove_number = field(5, "1")
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber(field(5, "1").to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Writes all six fields back out.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn check_placement(placement: &str) -> Result<&str, FenError> {
    let bad = |msg: String| FenError::InvalidPiecePlacement(msg);

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(bad(format!("expected 8 ranks, got {}", ranks.len())));
    }

    for (rank, text) in (1..=8).rev().zip(&ranks) {
        let mut width = 0;
        for c in text.chars() {
            width += match c {
                '1'..='8' => c as u32 - '0' as u32,
                'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => 1,
                _ => return Err(bad(format!("unexpected '{}' in rank {}", c, rank))),
            };
        }
        if width != 8 {
            return Err(bad(format!("rank {} covers {} squares", rank, width)));
        }
    }

    let kings = |k: char| placement.chars().filter(|&c| c == k).count();
    match (kings('K'), kings('k')) {
        (1, 1) => Ok(placement),
        (white, black) => Err(bad(format!(
            "need one king per side, found {} white and {} black",
            white, black
        ))),
    }
}

fn check_castling(castling: &str) -> Result<&str, FenError> {
    if castling == "-" {
        return Ok(castling);
    }
    let mut seen = String::new();
    for c in castling.chars() {
        if !matches!(c, 'K' | 'Q' | 'k' | 'q') {
            return Err(FenError::InvalidCastlingRights(format!("unexpected '{}'", c)));
        }
        if seen.contains(c) {
            return Err(FenError::InvalidCastlingRights(format!("'{}' repeated", c)));
        }
        seen.push(c);
    }
    Ok(castling)
}

fn check_en_passant(ep: &str) -> Result<&str, FenError> {
    match ep.as_bytes() {
        b"-" => Ok(ep),
        [b'a'..=b'h', b'3' | b'6'] => Ok(ep),
        _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
    }
}
