//! Two-player chess in the terminal.
//!
//! Reads commands from stdin, one per line, and prints the board after every
//! move. Diagnostics go to stderr at the configured level.

mod command;
mod config;
mod render;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chess_rules::GameState;
use clap::Parser;
use config::CliConfig;
use session::{Flow, Session};

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess with full FIDE move legality")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from this FEN position instead of the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces with Unicode glyphs
    #[arg(short, long)]
    unicode: bool,

    /// Log engine decisions at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.unicode {
        config.unicode_pieces = true;
    }
    if cli.verbose {
        config.log_level = "debug".to_string();
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.level()?)
        .init();

    let mut session = match cli.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => {
            let start = GameState::from_fen(fen)
                .with_context(|| format!("invalid start position '{}'", fen))?;
            Session::from_position(start, &config)
        }
        None => Session::new(&config),
    };
    tracing::info!(fen = %session.game().to_fen(), "starting game");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.show(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if session.handle(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    tracing::info!(status = %session.game().status_line(), "leaving");
    Ok(())
}
