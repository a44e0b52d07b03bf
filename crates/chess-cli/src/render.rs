//! Text rendering of the board.

use chess_core::Square;
use chess_rules::Board;

use crate::config::CliConfig;

/// How the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub unicode: bool,
    pub coordinates: bool,
}

impl From<&CliConfig> for RenderOptions {
    fn from(config: &CliConfig) -> Self {
        RenderOptions {
            unicode: config.unicode_pieces,
            coordinates: config.show_coordinates,
        }
    }
}

/// Draws the board from White's side, rank 8 at the top. Squares listed in
/// `marked` that hold no piece are drawn as `*`, occupied ones keep the piece.
pub fn render(board: &Board, options: RenderOptions, marked: &[Square]) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        if options.coordinates {
            out.push((b'8' - row) as char);
            out.push(' ');
        }
        for col in 0..8u8 {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let c = match board.piece_at(sq) {
                Some(piece) if options.unicode => piece.to_glyph(),
                Some(piece) => piece.to_fen_char(),
                None if marked.contains(&sq) => '*',
                None => '.',
            };
            out.push(c);
            if col < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    if options.coordinates {
        out.push_str("  a b c d e f g h\n");
    }
    out
}
