//! Parsing of the lines typed at the prompt.

use chess_core::{Move, MoveParseError, Square, SquareError};
use thiserror::Error;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a move given as two squares, e.g. `e2e4`.
    Play(Move),
    /// List where the piece on a square may go.
    Moves(Square),
    /// Redraw the board.
    Board,
    /// Print the position as FEN.
    Fen,
    /// Start a new game.
    New,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("'moves' needs a square, e.g. 'moves e2'")]
    MissingSquare,

    #[error(transparent)]
    Square(#[from] SquareError),

    #[error(transparent)]
    Move(#[from] MoveParseError),

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "moves" | "m" => {
                let square = words.next().ok_or(CommandError::MissingSquare)?;
                Ok(Command::Moves(square.parse()?))
            }
            "board" | "b" => Ok(Command::Board),
            "fen" => Ok(Command::Fen),
            "new" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => match Move::from_uci(head) {
                Ok(m) => Ok(Command::Play(m)),
                Err(MoveParseError::BadLength(_)) => Err(CommandError::Unknown(head.to_string())),
                Err(e) => Err(e.into()),
            },
        }
    }
}

pub const HELP: &str = "\
Commands:
  e2e4        play a move (from square, to square)
  moves e2    list legal destinations of the piece on e2
  board       redraw the board
  fen         print the position as FEN
  new         start a new game
  help        show this text
  quit        leave";
