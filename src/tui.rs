//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen rendering of the same game loop the line-based interface
//! drives, using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess` → (guess submitted, board redrawn) → `EnteringGuess`
//! - Terminal state: `GameOver`, left with any key

use crate::game_loop::{Board, GameInterface, GameOutcome, UserAction, format_result};
use crate::game_state::GameState;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_CHARS: usize = 40;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    GameOver,
}

/// Snapshot of the last board handed over by the game loop.
#[derive(Debug, Default)]
struct BoardView {
    stage: Vec<String>,
    masked_word: String,
    wrong: Vec<String>,
    remaining: usize,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    board: &'a BoardView,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    result: Option<(GameOutcome, &'a str)>,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: BoardView,
    current_input: String,
    state: TuiState,
    message: String,
    error_message: String,
    result: Option<(GameOutcome, String)>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        restore_on_err(execute!(stdout, EnterAlternateScreen, cursor::Hide))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = restore_on_err(Terminal::new(backend))?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: BoardView::default(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            result: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: &self.board,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            result: self.result.as_ref().map(|(o, text)| (*o, text.as_str())),
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(9),  // Gallows
                Constraint::Min(7),     // Info panel
                Constraint::Length(3),  // Input line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, chunks[1], &ctx.board.stage);
        Self::render_info(f, chunks[2], ctx);
        Self::render_input(f, chunks[3], ctx.current_input, ctx.state);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("GALGENRATEN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, stage: &[String]) {
        let lines: Vec<Line> = stage.iter().map(|l| Line::from(l.as_str())).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Galgen").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let board = ctx.board;
        let wrong = if board.wrong.is_empty() {
            "-".to_string()
        } else {
            board.wrong.join(" ")
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Wort:   "),
                Span::styled(board.masked_word.as_str(), WORD_STYLE),
            ]),
            Line::from(format!("Falsch: {wrong}")),
            Line::from(format!("Übrig:  {}", board.remaining)),
            Line::from(""),
        ];

        if let Some((outcome, text)) = ctx.result {
            let style = if outcome == GameOutcome::Won {
                SUCCESS_STYLE
            } else {
                LOSS_STYLE
            };
            for line in text.lines() {
                lines.push(Line::from(vec![Span::styled(line.to_string(), style)]));
            }
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => format!("> {current_input}_"),
            TuiState::GameOver => String::new(),
        };
        let paragraph =
            Paragraph::new(text).block(Block::default().title("Rate").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Buchstabe, ae/oe/ue, ss/sz oder ganzes Wort | ENTER: Raten | ESC: Abbruch"
            }
            TuiState::GameOver => "Beliebige Taste: Beenden",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Block until a key press arrives, ignoring everything else.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => self.draw_or_log(),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if has_ctrl => {
                info_log!("handle_guess_input() - Ctrl-C pressed, returning Abort");
                Some(UserAction::Abort)
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Abort");
                Some(UserAction::Abort)
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Char(c) => {
                // Replacement and control characters show up when alt-tabbing
                let is_garbage = c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD;
                if has_ctrl || key.modifiers.contains(KeyModifiers::ALT) || is_garbage {
                    debug_log!("handle_guess_input() - Ignoring {:?} with {:?}", c, key.modifiers);
                } else if self.current_input.chars().count() < MAX_INPUT_CHARS {
                    self.current_input.push(c);
                }
                None
            }
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, board: &Board) {
        self.board = BoardView {
            stage: board.stage.iter().map(|l| (*l).to_string()).collect(),
            masked_word: board.masked_word.clone(),
            wrong: board.wrong.clone(),
            remaining: board.remaining,
        };
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Abort");
                return UserAction::Abort;
            }
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_guess() - Input error: {}, returning Abort", e);
                    return UserAction::Abort;
                }
            };
            self.error_message.clear();
            if let Some(action) = self.handle_guess_input(key) {
                if let UserAction::Guess(guess) = &action {
                    self.message = format!("Zuletzt geraten: {}", guess.trim());
                }
                return action;
            }
        }
    }

    fn display_rejection(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_result(&mut self, outcome: GameOutcome, game: &GameState) {
        if outcome == GameOutcome::Aborted {
            return;
        }
        self.state = TuiState::GameOver;
        self.error_message.clear();
        self.result = Some((outcome, format_result(outcome, game)));
        self.draw_or_log();
        if let Err(e) = self.next_key() {
            debug_log!("display_result() - Input error: {}", e);
        }
    }
}

/// Leave raw mode when setup fails, since `Drop` never runs for a
/// half-built interface.
fn restore_on_err<T>(result: Result<T, io::Error>) -> Result<T, io::Error> {
    if result.is_err()
        && let Err(e) = disable_raw_mode()
    {
        debug_log!("restore_on_err() - Could not disable raw mode: {}", e);
    }
    result
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
