use hangman::cli::{CliInterface, farewell_message, parse_cli};
use hangman::error::WordBankError;
use hangman::game_state::game_loop;
use hangman::logging::{LogDestination, default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::wordbank::load_default_wordbank;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let destination = if cli.tui {
        LogDestination::File(default_log_path())
    } else {
        LogDestination::Stderr
    };
    init_logging(cli.verbose, &destination);

    let wordbank = match load_default_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            error!("{e}");
            eprintln!("Failed to load word list: {e}");
            return match e {
                WordBankError::SourceUnavailable { .. } => ExitCode::from(2),
                WordBankError::EmptyWordList => ExitCode::from(3),
            };
        }
    };
    info!("Loaded {} candidate words", wordbank.len());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                error!("Failed to initialise terminal UI: {e}");
                eprintln!("Failed to initialise terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        let stats = game_loop(&wordbank, &mut interface, &mut rng);
        // leave the alternate screen first so the tally stays visible
        drop(interface);
        println!("{}", farewell_message(&stats));
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&wordbank, &mut interface, &mut rng);
    }

    ExitCode::SUCCESS
}
