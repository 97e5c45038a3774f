use crate::error::InvalidGuess;
use crate::game_state::{GameInterface, Round, RoundStatus, SessionStats, UserAction};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Terminal hangman
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for the word picker, for a reproducible sequence of words
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// The replay answer: `y` or `yes` in any case.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints `prompt` and reads one line. `None` on end of input or a read error.
pub fn read_line<R: BufRead>(reader: &mut R, prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => {
            println!();
            None
        }
        Ok(_) => Some(input),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> UserAction {
    read_line(reader, "Guess a letter: ").map_or(UserAction::Exit, UserAction::Guess)
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> bool {
    read_line(reader, "Do you wanna play again? (y/n): ").is_some_and(|answer| is_affirmative(&answer))
}

pub fn display_round_start(round_number: u32, word_length: usize) {
    println!("Round {round_number}: the word has {word_length} letters.");
}

pub fn display_masked(round: &Round) {
    println!("{}", round.word().masked_view());
}

pub fn display_invalid_guess(error: &InvalidGuess) {
    println!("{error}");
}

pub fn display_guess_result(letter: char, hit: bool, remaining: u32) {
    if hit {
        println!("Yes! The word does contain {letter}.");
    } else {
        println!("Sorry! No {letter}'s.");
        println!("Wrong guesses remaining: {remaining}");
    }
    println!();
}

pub fn display_round_over(outcome: RoundStatus, word: &str) {
    match outcome {
        RoundStatus::Won => println!("You win!!! The word was {word}"),
        RoundStatus::Lost => println!("You lose! The word was {word}"),
        RoundStatus::AwaitingGuess => {}
    }
}

/// Closing line for the session, also printed after the full-screen
/// interface hands the terminal back.
#[must_use]
pub fn farewell_message(stats: &SessionStats) -> String {
    if stats.rounds_played() > 0 {
        format!("Thanks for playing! Won {}, lost {}.", stats.won, stats.lost)
    } else {
        "Exiting.".to_string()
    }
}

pub fn display_exit_message(stats: &SessionStats) {
    println!("{}", farewell_message(stats));
}

/// Line-based console implementation of [`GameInterface`].
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round_start(&mut self, round_number: u32, word_length: usize) {
        display_round_start(round_number, word_length);
    }

    fn display_progress(&mut self, round: &Round) {
        display_masked(round);
    }

    fn read_guess(&mut self) -> UserAction {
        read_guess(&mut self.reader)
    }

    fn display_invalid_guess(&mut self, error: &InvalidGuess) {
        display_invalid_guess(error);
    }

    fn display_guess_result(&mut self, letter: char, hit: bool, round: &Round) {
        display_guess_result(letter, hit, round.remaining_guesses());
    }

    fn display_round_over(&mut self, outcome: RoundStatus, round: &Round) {
        display_round_over(outcome, round.word().word());
    }

    fn ask_play_again(&mut self) -> bool {
        read_play_again(&mut self.reader)
    }

    fn display_exit_message(&mut self, stats: &SessionStats) {
        display_exit_message(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_loop;
    use crate::wordbank::load_wordbank_from_str;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::parse_from(["hangman"]);
        assert_eq!(cli.wordbank_path, None);
        assert!(!cli.tui);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::parse_from(["hangman", "-i", "words.txt", "--tui", "--seed", "42", "-vv"]);
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert!(cli.tui);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  YeS  "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah")); // Exact match only
        assert!(!is_affirmative("yes please"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_farewell_message() {
        assert_eq!(farewell_message(&SessionStats::default()), "Exiting.");
        assert_eq!(
            farewell_message(&SessionStats { won: 2, lost: 1 }),
            "Thanks for playing! Won 2, lost 1."
        );
    }

    #[test]
    fn test_read_guess_returns_raw_line() {
        let mut reader = Cursor::new("  apple \n");
        assert_eq!(read_guess(&mut reader), UserAction::Guess("  apple \n".to_string()));
    }

    #[test]
    fn test_read_guess_end_of_input_is_exit() {
        let mut reader = Cursor::new("");
        assert_eq!(read_guess(&mut reader), UserAction::Exit);
    }

    #[test]
    fn test_read_play_again() {
        assert!(read_play_again(&mut Cursor::new("yes\n")));
        assert!(read_play_again(&mut Cursor::new("y\n")));
        assert!(!read_play_again(&mut Cursor::new("n\n")));
        assert!(!read_play_again(&mut Cursor::new("")));
    }

    #[test]
    fn test_cli_interface_full_game() {
        let wordbank = load_wordbank_from_str("apple\n").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut interface = CliInterface::new(Cursor::new("a\np\nl\ne\nn\n"));

        let stats = game_loop(&wordbank, &mut interface, &mut rng);
        assert_eq!(stats, SessionStats { won: 1, lost: 0 });
    }

    #[test]
    fn test_cli_interface_invalid_input_then_win() {
        let wordbank = load_wordbank_from_str("apple\n").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let input = "5\n\na\nA\npear\nl\ne\nno\n";
        let mut interface = CliInterface::new(Cursor::new(input));

        let stats = game_loop(&wordbank, &mut interface, &mut rng);
        assert_eq!(stats.won, 1);
    }

    #[test]
    fn test_cli_interface_two_rounds() {
        let wordbank = load_wordbank_from_str("apple\n").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let input = "z\nx\nq\nw\nr\nt\nYES\na\np\nl\ne\nn\n";
        let mut interface = CliInterface::new(Cursor::new(input));

        let stats = game_loop(&wordbank, &mut interface, &mut rng);
        assert_eq!(stats, SessionStats { won: 1, lost: 1 });
    }

    #[test]
    fn test_cli_interface_input_ends_mid_round() {
        let wordbank = load_wordbank_from_str("apple\n").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut interface = CliInterface::new(Cursor::new("a\n"));

        let stats = game_loop(&wordbank, &mut interface, &mut rng);
        assert_eq!(stats.rounds_played(), 0);
    }
}
