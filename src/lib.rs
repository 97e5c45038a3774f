// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod word_state;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{InvalidGuess, WordBankError};
pub use game_state::{
    GameInterface, MAX_WRONG, Round, RoundStatus, SessionStats, UserAction, game_loop, play_round,
};
pub use word_state::WordState;
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
