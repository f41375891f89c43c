use game_types::WORD_LENGTH;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::normalize_word;

pub const ANSWERS_FILE: &str = "answers.txt";
pub const ALLOWED_FILE: &str = "allowed.txt";

/// Decides whether a word may be submitted as a guess.
pub trait Dictionary {
    fn is_allowed_guess(&self, word: &str) -> bool;
}

impl<F> Dictionary for F
where
    F: Fn(&str) -> bool,
{
    fn is_allowed_guess(&self, word: &str) -> bool {
        self(word)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to read word list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("answer list contains no usable words")]
    NoAnswers,
}

/// Answer rotation list plus the set of accepted guesses.
#[derive(Debug, Clone)]
pub struct WordValidator {
    answers: Vec<String>,
    allowed: HashSet<String>,
}

impl WordValidator {
    /// Build from in-memory word lists, one word per line.
    ///
    /// Every answer is also an accepted guess.
    pub fn from_word_lists(answers: &str, allowed: &str) -> Result<Self, WordListError> {
        let mut seen = HashSet::new();
        let answers: Vec<String> = parse_word_list(answers)
            .filter(|word| seen.insert(word.clone()))
            .collect();

        if answers.is_empty() {
            return Err(WordListError::NoAnswers);
        }

        let allowed = parse_word_list(allowed)
            .chain(answers.iter().cloned())
            .collect();

        Ok(Self { answers, allowed })
    }

    /// Load `answers.txt` and the optional `allowed.txt` from a directory.
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self, WordListError> {
        let dir = dir.as_ref();
        let answers = read_list(&dir.join(ANSWERS_FILE))?;

        let allowed_path = dir.join(ALLOWED_FILE);
        let allowed = if allowed_path.exists() {
            read_list(&allowed_path)?
        } else {
            String::new()
        };

        Self::from_word_lists(&answers, &allowed)
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn is_valid_word(&self, word: &str) -> bool {
        self.allowed.contains(&normalize_word(word))
    }

    pub fn allowed_count(&self) -> usize {
        self.allowed.len()
    }
}

impl Dictionary for WordValidator {
    fn is_allowed_guess(&self, word: &str) -> bool {
        self.is_valid_word(word)
    }
}

fn read_list(path: &Path) -> Result<String, WordListError> {
    std::fs::read_to_string(path).map_err(|source| WordListError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_word_list(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .filter(|word| word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_validator() {
        let validator =
            WordValidator::from_word_lists("water\nteeth\n", "salad\ngrape\n").unwrap();

        assert!(validator.is_valid_word("water"));
        assert!(validator.is_valid_word("WATER")); // case insensitive
        assert!(validator.is_valid_word(" salad "));
        assert!(!validator.is_valid_word("zzzzz"));
        assert_eq!(validator.answers(), ["water", "teeth"]);
        assert_eq!(validator.allowed_count(), 4);
    }

    #[test]
    fn test_comments_whitespace_and_lengths_filtered() {
        let answers = "# answers\n\n  Water  \nwaters\nwat\nwa7er\nteeth\nwater\n";
        let validator = WordValidator::from_word_lists(answers, "").unwrap();

        // duplicates collapse, order of first appearance kept
        assert_eq!(validator.answers(), ["water", "teeth"]);
        assert!(!validator.is_valid_word("waters"));
        assert!(!validator.is_valid_word("wa7er"));
    }

    #[test]
    fn test_empty_answer_list_rejected() {
        let result = WordValidator::from_word_lists("# nothing here\n", "water\n");
        assert!(matches!(result, Err(WordListError::NoAnswers)));
    }

    #[test]
    fn test_dictionary_trait_for_validator_and_closures() {
        let validator = WordValidator::from_word_lists("water", "").unwrap();
        assert!(validator.is_allowed_guess("water"));
        assert!(!validator.is_allowed_guess("teeth"));

        let closure = |word: &str| word.starts_with('t');
        assert!(closure.is_allowed_guess("teeth"));
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let err = WordValidator::from_directory("/nonexistent/words").unwrap_err();
        assert!(err.to_string().contains("answers.txt"));
    }
}
