use std::collections::HashSet;

/// Placeholder shown for letters that have not been guessed yet.
pub const MASK_CHAR: char = '-';

/// Reveal state of one secret word for the length of a round.
#[derive(Debug, Clone)]
pub struct WordState {
    target: String,
    letters: HashSet<char>,
    guessed: HashSet<char>,
}

impl WordState {
    /// Expects a non-empty lowercase word; the word bank guarantees this.
    #[must_use]
    pub fn new(word: &str) -> Self {
        Self {
            target: word.to_string(),
            letters: word.chars().collect(),
            guessed: HashSet::new(),
        }
    }

    /// Records `letter` and reports whether the word contains it.
    ///
    /// Guessing the same letter again leaves the state unchanged and returns
    /// the same answer.
    pub fn guess(&mut self, letter: char) -> bool {
        self.guessed.insert(letter);
        self.letters.contains(&letter)
    }

    #[must_use]
    pub fn already_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    /// True once every distinct letter of the word has been guessed.
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.guessed.is_superset(&self.letters)
    }

    /// The word with unguessed letters replaced by [`MASK_CHAR`].
    #[must_use]
    pub fn masked_view(&self) -> String {
        self.target
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { MASK_CHAR })
            .collect()
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.target
    }

    /// Letters guessed so far, alphabetically.
    #[must_use]
    pub fn guessed_letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.guessed.iter().copied().collect();
        letters.sort_unstable();
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_word_is_fully_masked() {
        let state = WordState::new("apple");
        assert_eq!(state.masked_view(), "-----");
        assert!(!state.all_revealed());
        assert!(state.guessed_letters().is_empty());
    }

    #[test]
    fn test_guess_hit_and_miss() {
        let mut state = WordState::new("apple");
        assert!(state.guess('p'));
        assert!(!state.guess('z'));
        assert_eq!(state.masked_view(), "-pp--");
    }

    #[test]
    fn test_misses_are_still_recorded() {
        let mut state = WordState::new("apple");
        state.guess('z');
        assert!(state.already_guessed('z'));
        assert!(!state.already_guessed('q'));
    }

    #[test]
    fn test_guess_is_idempotent() {
        let mut state = WordState::new("apple");
        let first = state.guess('a');
        let letters_after_first = state.guessed_letters();
        let second = state.guess('a');
        assert_eq!(first, second);
        assert_eq!(state.guessed_letters(), letters_after_first);

        assert_eq!(state.guess('x'), state.guess('x'));
        assert_eq!(state.guessed_letters(), vec!['a', 'x']);
    }

    #[test]
    fn test_all_revealed_needs_every_distinct_letter() {
        let mut state = WordState::new("apple");
        for letter in ['a', 'p', 'l'] {
            state.guess(letter);
            assert!(!state.all_revealed());
        }
        state.guess('e');
        assert!(state.all_revealed());
        assert_eq!(state.masked_view(), "apple");
    }

    #[test]
    fn test_all_revealed_ignores_extra_wrong_letters() {
        let mut state = WordState::new("level");
        for letter in ['q', 'l', 'z', 'e', 'v'] {
            state.guess(letter);
        }
        assert!(state.all_revealed());
    }

    #[test]
    fn test_guessed_letters_sorted() {
        let mut state = WordState::new("zebra");
        for letter in ['r', 'b', 'z', 'a'] {
            state.guess(letter);
        }
        assert_eq!(state.guessed_letters(), vec!['a', 'b', 'r', 'z']);
        assert_eq!(state.word(), "zebra");
    }
}
