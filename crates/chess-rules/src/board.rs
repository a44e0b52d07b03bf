//! Board state: the 8x8 grid plus transient en-passant metadata.

use chess_core::{Color, FenError, FenParser, Piece, PieceKind, Square};

/// The square a pawn skipped over with its double step, and whose pawn it was.
///
/// Valid for exactly one reply: every committed move either replaces it (a new
/// double step) or clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    pub square: Square,
    pub owner: Color,
}

/// Back-rank order from the `a` file to the `h` file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 board.
///
/// Every square holds exactly one entry; `None` is the empty-square sentinel.
/// The board is mutated only by move application, by the scoped simulation
/// used for check testing (which always restores it), and by reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    en_passant: Option<EnPassant>,
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            en_passant: None,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Restores the standard starting position with every piece unmoved and
    /// no en-passant target.
    pub fn reset(&mut self) {
        self.squares = [None; 64];
        self.en_passant = None;

        for color in Color::ALL {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                let back = Square::new(color.back_rank(), col as u8);
                let pawn = Square::new(color.pawn_rank(), col as u8);
                if let (Some(back), Some(pawn)) = (back, pawn) {
                    self.put(back, Piece::new(*kind, color));
                    self.put(pawn, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
    }

    /// Creates a board from a FEN string.
    ///
    /// The active color is only used to attribute the en-passant target.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Self::from_parsed(&parsed))
    }

    /// Builds a board from already-validated FEN fields.
    ///
    /// Castling availability is folded into the per-piece moved flags: a king
    /// is unmoved only on its home square with at least one right, a corner
    /// rook only when its side's right is present. Pawns are unmoved only on
    /// their starting row.
    pub fn from_parsed(parsed: &FenParser) -> Self {
        let mut board = Board::empty();

        for (row, rank_str) in parsed.piece_placement.split('/').enumerate() {
            let mut col = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    col += digit as u8;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    if let Some(sq) = Square::new(row as u8, col) {
                        let has_moved = !starts_unmoved(kind, color, sq, &parsed.castling);
                        board.put(
                            sq,
                            Piece {
                                kind,
                                color,
                                has_moved,
                            },
                        );
                    }
                    col += 1;
                }
            }
        }

        let to_move = match parsed.active_color {
            'b' => Color::Black,
            _ => Color::White,
        };
        board.en_passant = Square::from_algebraic(&parsed.en_passant).map(|square| EnPassant {
            square,
            owner: to_move.opposite(),
        });

        board
    }

    /// Converts the board to a FEN string with the given side to move.
    ///
    /// Clocks are not tracked, so they are always written as `0 1`.
    pub fn to_fen(&self, to_move: Color) -> String {
        let mut placement = String::new();

        for row in 0..8u8 {
            let mut empty_count = 0;
            for col in 0..8u8 {
                match Square::new(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            placement.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                placement.push_str(&empty_count.to_string());
            }
            if row < 7 {
                placement.push('/');
            }
        }

        let mut castling = self.castling_availability();
        if castling.is_empty() {
            castling.push('-');
        }

        FenParser {
            piece_placement: placement,
            active_color: to_move.to_fen_char(),
            castling,
            en_passant: self
                .en_passant
                .map_or_else(|| "-".to_string(), |ep| ep.square.to_algebraic()),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
        .to_fen()
    }

    /// Castling availability in FEN order, derived from the moved flags.
    fn castling_availability(&self) -> String {
        let mut out = String::new();
        for (color, king_side, queen_side) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            let row = color.back_rank();
            let unmoved = |col: u8, kind: PieceKind| {
                Square::new(row, col)
                    .and_then(|sq| self.piece_at(sq))
                    .is_some_and(|p| p.is(kind, color) && !p.has_moved)
            };
            if !unmoved(4, PieceKind::King) {
                continue;
            }
            if unmoved(7, PieceKind::Rook) {
                out.push(king_side);
            }
            if unmoved(0, PieceKind::Rook) {
                out.push(queen_side);
            }
        }
        out
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Returns the current en-passant target, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    /// Iterates over every occupied square.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares occupied by one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Locates the king of the given color.
    ///
    /// A board reached by legal play has exactly one king per color; `None`
    /// only occurs for hand-built boards that break that invariant.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq);
        let king = kings.next();
        debug_assert!(kings.next().is_none(), "more than one {} king", color);
        king
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.set(sq, Some(piece));
    }

    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, ep: Option<EnPassant>) {
        self.en_passant = ep;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

fn starts_unmoved(kind: PieceKind, color: Color, sq: Square, castling: &str) -> bool {
    let (king_side, queen_side) = match color {
        Color::White => ('K', 'Q'),
        Color::Black => ('k', 'q'),
    };
    let home_row = sq.row() == color.back_rank();
    match kind {
        PieceKind::Pawn => sq.row() == color.pawn_rank(),
        PieceKind::King => {
            home_row && sq.col() == 4 && (castling.contains(king_side) || castling.contains(queen_side))
        }
        PieceKind::Rook => match sq.col() {
            7 => home_row && castling.contains(king_side),
            0 => home_row && castling.contains(queen_side),
            _ => false,
        },
        _ => true,
    }
}
