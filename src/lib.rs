// Library interface for hangman-de
// This allows integration tests to access internal modules

pub mod cli;
pub mod frames;
pub mod game_loop;
pub mod game_state;
pub mod logging;
pub mod normalize;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use frames::FrameSelector;
pub use game_loop::{GameInterface, GameOutcome, UserAction, game_loop};
pub use game_state::{GameError, GameState, GuessOutcome, GuessTag, Word};
pub use normalize::normalize;
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str, pick_word};
