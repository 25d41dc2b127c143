//! Game driver: renders the board, reads guesses and applies them until the
//! game is won, lost or aborted. Presentation lives behind [`GameInterface`].

use crate::frames::FrameSelector;
use crate::game_state::GameState;
use crate::{debug_log, info_log};

pub const EXIT_WON: u8 = 0;
pub const EXIT_LOST: u8 = 1;
pub const EXIT_ABORTED: u8 = 130;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
    Aborted,
}

impl GameOutcome {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Won => EXIT_WON,
            Self::Lost => EXIT_LOST,
            Self::Aborted => EXIT_ABORTED,
        }
    }
}

/// Everything a presentation needs to draw one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    /// Gallows lines, padded to the height of the tallest stage.
    pub stage: Vec<&'a str>,
    pub masked_word: String,
    pub wrong: Vec<String>,
    pub remaining: usize,
}

impl<'a> Board<'a> {
    pub fn new(game: &GameState, frames: &'a FrameSelector) -> Self {
        Self {
            stage: frames.padded(game.wrong_count()),
            masked_word: game.masked_word(),
            wrong: game.wrong_attempts().iter().cloned().collect(),
            remaining: game.remaining(),
        }
    }
}

pub trait GameInterface {
    fn display_board(&mut self, board: &Board);
    fn read_guess(&mut self) -> UserAction;
    fn display_rejection(&mut self, message: &str);
    fn display_result(&mut self, outcome: GameOutcome, game: &GameState);
}

/// The three status lines shown under the gallows.
#[must_use]
pub fn format_status(board: &Board) -> String {
    let wrong = if board.wrong.is_empty() {
        "-".to_string()
    } else {
        board.wrong.join(" ")
    };
    format!(
        "Wort:   {}\nFalsch: {}\nÜbrig:  {}\n",
        board.masked_word, wrong, board.remaining
    )
}

/// Final message naming the solution in both spellings.
#[must_use]
pub fn format_result(outcome: GameOutcome, game: &GameState) -> String {
    let word = game.word();
    let headline = match outcome {
        GameOutcome::Won => "🎉 Gewonnen!",
        GameOutcome::Lost => "💀 Verloren…",
        GameOutcome::Aborted => return "Abbruch.\n".to_string(),
    };
    format!(
        "{headline} Lösung (normalisiert): {}\n   Original: {}\n",
        word.normalized(),
        word.original()
    )
}

pub fn game_loop<I: GameInterface>(
    game: &mut GameState,
    frames: &FrameSelector,
    interface: &mut I,
) -> GameOutcome {
    while !game.is_over() {
        interface.display_board(&Board::new(game, frames));

        let raw = match interface.read_guess() {
            UserAction::Guess(raw) => raw,
            UserAction::Abort => {
                info_log!("game_loop() - Aborted by user");
                interface.display_result(GameOutcome::Aborted, game);
                return GameOutcome::Aborted;
            }
        };

        let outcome = game.guess(&raw);
        debug_log!(
            "game_loop() - '{}' -> {:?}, wrong={}/{}",
            raw,
            outcome.tag,
            game.wrong_count(),
            game.max_wrong()
        );
        if !outcome.applied {
            interface.display_rejection(&outcome.to_string());
        }
    }

    interface.display_board(&Board::new(game, frames));
    let outcome = if game.is_won() {
        GameOutcome::Won
    } else {
        GameOutcome::Lost
    };
    info_log!("game_loop() - Finished: {:?}", outcome);
    interface.display_result(outcome, game);
    outcome
}
