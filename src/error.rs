//! Error types for loading the word list and validating guesses.

use derive_more::{Display, Error};
use std::io;

/// Fatal errors raised while building the word bank. Both abort the
/// program before the first round starts.
#[derive(Debug, Display, Error)]
pub enum WordBankError {
    /// The word list file could not be opened or read.
    #[display("could not read word list '{path}': {source}")]
    SourceUnavailable { path: String, source: io::Error },
    /// No line survived the length/alphabet filter.
    #[display("word list contains no words of five or more letters")]
    EmptyWordList,
}

/// Why a line typed by the player was not accepted as a guess.
///
/// Recoverable: the round controller re-prompts and the wrong-guess budget
/// is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidGuess {
    #[display("Please enter a letter.")]
    Empty,
    #[display("{_0} was already guessed.")]
    AlreadyGuessed(#[error(not(source))] char),
    #[display("{_0} is not a letter!")]
    NotALetter(#[error(not(source))] char),
}
