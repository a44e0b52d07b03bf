//! One interactive game: turns commands into engine calls and text.

use std::io::Write;

use chess_rules::GameState;

use crate::command::{Command, HELP};
use crate::config::CliConfig;
use crate::render::{render, RenderOptions};

/// Whether the prompt loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    game: GameState,
    /// Position loaded from FEN, if any. `new` returns here instead of the
    /// standard setup.
    custom_start: Option<GameState>,
    options: RenderOptions,
    highlight: bool,
}

impl Session {
    /// A session on the standard starting position.
    pub fn new(config: &CliConfig) -> Self {
        Self::build(GameState::new(), None, config)
    }

    /// A session that begins, and restarts, from `start`.
    pub fn from_position(start: GameState, config: &CliConfig) -> Self {
        Self::build(start.clone(), Some(start), config)
    }

    fn build(game: GameState, custom_start: Option<GameState>, config: &CliConfig) -> Self {
        Session {
            game,
            custom_start,
            options: RenderOptions::from(config),
            highlight: config.highlight_legal,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Prints the board and the status line.
    pub fn show<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", render(self.game.board(), self.options, &[]))?;
        writeln!(out, "{}", self.game.status_line())
    }

    /// Handles one line of input.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> std::io::Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Play(m) => match self.game.play(m.from, m.to) {
                Ok(_) => self.show(out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Moves(from) => {
                let targets = self.game.legal_destinations(from);
                if targets.is_empty() {
                    writeln!(out, "no legal moves from {}", from)?;
                } else {
                    if self.highlight {
                        write!(out, "{}", render(self.game.board(), self.options, &targets))?;
                    }
                    let list: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
                    writeln!(out, "{}: {}", from, list.join(" "))?;
                }
            }
            Command::Board => self.show(out)?,
            Command::Fen => writeln!(out, "{}", self.game.to_fen())?,
            Command::New => {
                match &self.custom_start {
                    Some(start) => self.game = start.clone(),
                    None => self.game.reset(),
                }
                tracing::info!(fen = %self.game.to_fen(), "new game");
                self.show(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}
