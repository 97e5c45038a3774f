use crate::error::WordBankError;
use crate::info_log;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Shortest word a round may be played with.
pub const MIN_WORD_LENGTH: usize = 5;

/// Filtered, immutable list of secret-word candidates.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    /// Builds a bank from raw lines, keeping only candidate words.
    ///
    /// Fails with [`WordBankError::EmptyWordList`] if nothing survives the filter.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, WordBankError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = lines
            .into_iter()
            .filter_map(|line| {
                // only the line terminator is stripped; padded lines are rejected
                let word = line.as_ref().trim_end_matches(['\r', '\n']);
                is_candidate_word(word).then(|| word.to_lowercase())
            })
            .collect();

        if words.is_empty() {
            return Err(WordBankError::EmptyWordList);
        }
        Ok(Self { words })
    }

    /// Picks a word uniformly at random.
    pub fn next_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // never empty: `from_lines` rejects an empty list
        self.words.choose(rng).map_or("", String::as_str)
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// True for lines made of at least [`MIN_WORD_LENGTH`] ASCII letters.
#[must_use]
pub fn is_candidate_word(word: &str) -> bool {
    word.chars().count() >= MIN_WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str) -> Result<WordBank, WordBankError> {
    WordBank::from_lines(data.lines())
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank, WordBankError> {
    let path = path.as_ref();
    let unavailable = |source| WordBankError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.map_err(unavailable)?);
    }

    let bank = WordBank::from_lines(lines)?;
    info_log!("Loaded {} words from {}", bank.len(), path.display());
    Ok(bank)
}

/// Location of the player's own word list, if the platform has a data directory.
#[must_use]
pub fn get_user_wordbank_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("hangman").join("words.txt"))
}

/// Loads the word list the game should use.
///
/// An explicit path must be readable. Without one, the user word list is
/// used when present and the embedded list otherwise.
pub fn load_default_wordbank(explicit: Option<&Path>) -> Result<WordBank, WordBankError> {
    if let Some(path) = explicit {
        return load_wordbank_from_file(path);
    }

    if let Some(path) = get_user_wordbank_path()
        && path.is_file()
    {
        return load_wordbank_from_file(path);
    }

    load_wordbank_from_str(EMBEDDED_WORDBANK)
}
