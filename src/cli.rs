use crate::debug_log;
use crate::game_loop::{Board, GameInterface, GameOutcome, UserAction, format_result, format_status};
use crate::game_state::GameState;
use clap::Parser;
use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = "Rate (Buchstabe / ae/oe/ue / ss/sz): ";

/// Hangman with German umlaut and eszett handling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Newline-delimited word list (UTF-8, one word per line)
    #[arg(value_name = "WORDLIST")]
    pub wordlist: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for the word choice, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level for the log file (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Line-based interface. The gallows is redrawn in place by moving the
/// cursor back over everything printed since the previous board.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    lines_since_draw: u16,
    first_draw: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            lines_since_draw: 0,
            first_draw: true,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_lines(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        let newlines = text.matches('\n').count();
        self.lines_since_draw = self
            .lines_since_draw
            .saturating_add(u16::try_from(newlines).unwrap_or(u16::MAX));
        Ok(())
    }

    fn draw(&mut self, board: &Board) -> io::Result<()> {
        if !self.first_draw && self.lines_since_draw > 0 {
            queue!(self.writer, cursor::MoveToPreviousLine(self.lines_since_draw))?;
        }
        self.first_draw = false;
        queue!(self.writer, Clear(ClearType::FromCursorDown))?;
        self.lines_since_draw = 0;

        let mut text = board.stage.join("\n");
        text.push_str("\n\n");
        text.push_str(&format_status(board));
        self.write_lines(&text)?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.writer.write_all(PROMPT.as_bytes())?;
        self.writer.flush()?;
        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        // The echoed input line ends the prompt line on screen.
        self.lines_since_draw = self.lines_since_draw.saturating_add(1);
        Ok(Some(input))
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_board(&mut self, board: &Board) {
        if let Err(e) = self.draw(board) {
            debug_log!("CliInterface::display_board() - Draw error: {}", e);
        }
    }

    fn read_guess(&mut self) -> UserAction {
        match self.read_line() {
            Ok(Some(input)) => UserAction::Guess(input),
            Ok(None) => UserAction::Abort,
            Err(e) => {
                debug_log!("CliInterface::read_guess() - Read error: {}", e);
                UserAction::Abort
            }
        }
    }

    fn display_rejection(&mut self, message: &str) {
        if let Err(e) = self.write_lines(&format!("{message}\n")) {
            debug_log!("CliInterface::display_rejection() - Write error: {}", e);
        }
    }

    fn display_result(&mut self, outcome: GameOutcome, game: &GameState) {
        let mut text = format_result(outcome, game);
        if outcome == GameOutcome::Aborted {
            text.insert(0, '\n');
        }
        if let Err(e) = self.write_lines(&text).and_then(|()| self.writer.flush()) {
            debug_log!("CliInterface::display_result() - Write error: {}", e);
        }
    }
}
