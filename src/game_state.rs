use crate::error::InvalidGuess;
use crate::word_state::WordState;
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::Rng;

/// Wrong guesses allowed before the round is lost.
pub const MAX_WRONG: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    AwaitingGuess,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// A raw input line; only its first character is considered.
    Guess(String),
    Exit,
}

/// Rounds won and lost during this run of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub won: u32,
    pub lost: u32,
}

impl SessionStats {
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.won + self.lost
    }

    fn record(&mut self, outcome: RoundStatus) {
        match outcome {
            RoundStatus::Won => self.won += 1,
            RoundStatus::Lost => self.lost += 1,
            RoundStatus::AwaitingGuess => {}
        }
    }
}

/// One round: the secret word's reveal state plus the wrong-guess counter.
#[derive(Debug, Clone)]
pub struct Round {
    word: WordState,
    wrong_count: u32,
}

impl Round {
    #[must_use]
    pub fn new(word: &str) -> Self {
        Self {
            word: WordState::new(word),
            wrong_count: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.word.all_revealed() {
            RoundStatus::Won
        } else if self.wrong_count >= MAX_WRONG {
            RoundStatus::Lost
        } else {
            RoundStatus::AwaitingGuess
        }
    }

    /// Turns a raw input line into a letter that may be guessed.
    ///
    /// Only the first character of the trimmed line is looked at. The check
    /// for a repeated letter comes before the check for a non-letter.
    pub fn validate(&self, raw: &str) -> Result<char, InvalidGuess> {
        let letter = raw
            .trim()
            .chars()
            .next()
            .ok_or(InvalidGuess::Empty)?
            .to_ascii_lowercase();

        if self.word.already_guessed(letter) {
            Err(InvalidGuess::AlreadyGuessed(letter))
        } else if !letter.is_ascii_alphabetic() {
            Err(InvalidGuess::NotALetter(letter))
        } else {
            Ok(letter)
        }
    }

    /// Applies a validated letter. A miss costs one wrong guess.
    pub fn apply(&mut self, letter: char) -> bool {
        let hit = self.word.guess(letter);
        if !hit {
            self.wrong_count += 1;
        }
        hit
    }

    #[must_use]
    pub fn word(&self) -> &WordState {
        &self.word
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> u32 {
        MAX_WRONG.saturating_sub(self.wrong_count)
    }
}

/// Input/output boundary of the game, implemented by the console and the
/// full-screen front ends.
pub trait GameInterface {
    fn display_round_start(&mut self, round_number: u32, word_length: usize);
    fn display_progress(&mut self, round: &Round);
    fn read_guess(&mut self) -> UserAction;
    fn display_invalid_guess(&mut self, error: &InvalidGuess);
    fn display_guess_result(&mut self, letter: char, hit: bool, round: &Round);
    fn display_round_over(&mut self, outcome: RoundStatus, round: &Round);
    /// Returns true if the player wants another round.
    fn ask_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self, stats: &SessionStats);
}

/// Plays rounds until the player declines a replay or exits.
pub fn game_loop<I, R>(wordbank: &WordBank, interface: &mut I, rng: &mut R) -> SessionStats
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = SessionStats::default();

    loop {
        let word = wordbank.next_word(rng);
        interface.display_round_start(stats.rounds_played() + 1, word.len());

        let Some(outcome) = play_round(word, interface) else {
            break;
        };
        stats.record(outcome);

        if !interface.ask_play_again() {
            break;
        }
    }

    info_log!("Session over: {} won, {} lost", stats.won, stats.lost);
    interface.display_exit_message(&stats);
    stats
}

/// Runs the guess loop for one word.
///
/// Returns the final status, or `None` if the player left mid-round.
pub fn play_round<I: GameInterface + ?Sized>(word: &str, interface: &mut I) -> Option<RoundStatus> {
    let mut round = Round::new(word);
    debug_log!("New round, word length {}", word.len());

    while round.status() == RoundStatus::AwaitingGuess {
        interface.display_progress(&round);
        let letter = read_valid_letter(&round, interface)?;

        let hit = round.apply(letter);
        debug_log!(
            "Guess '{}' {} ({} wrong)",
            letter,
            if hit { "hit" } else { "missed" },
            round.wrong_count()
        );
        interface.display_guess_result(letter, hit, &round);
    }

    let outcome = round.status();
    info_log!("Round over: {:?} after {} wrong guesses", outcome, round.wrong_count());
    interface.display_round_over(outcome, &round);
    Some(outcome)
}

/// Re-prompts until the player supplies a new letter. Rejected input does
/// not touch the wrong-guess budget.
fn read_valid_letter<I: GameInterface + ?Sized>(round: &Round, interface: &mut I) -> Option<char> {
    loop {
        match interface.read_guess() {
            UserAction::Exit => return None,
            UserAction::Guess(input) => match round.validate(&input) {
                Ok(letter) => return Some(letter),
                Err(error) => {
                    debug_log!("Rejected guess {:?}: {}", input, error);
                    interface.display_invalid_guess(&error);
                }
            },
        }
    }
}
