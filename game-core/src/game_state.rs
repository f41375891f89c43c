use chrono::{DateTime, Utc};
use game_types::{
    GameStatus, GuessError, GuessOutcome, LetterResult, MAX_GUESSES, WORD_LENGTH,
};
use serde::{Deserialize, Serialize};

use crate::{Dictionary, FeedbackPolicy, compute_feedback_with};

/// Normalized form used for every comparison: no surrounding whitespace, lowercase.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// One puzzle: a fixed answer and the guesses made against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(skip)]
    id: Option<i32>,
    answer: String,
    guesses: Vec<String>,
    won: bool,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(answer: &str) -> Self {
        Self::new_at(answer, Utc::now())
    }

    pub fn new_at(answer: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            answer: normalize_word(answer),
            guesses: Vec::with_capacity(MAX_GUESSES),
            won: false,
            started_at,
            finished_at: None,
        }
    }

    /// Submit a guess.
    ///
    /// Rejected guesses (`InvalidLength`, `InvalidWord`) leave the game untouched
    /// and do not use up an attempt. Once the game has reached `Won` or `Lost`,
    /// every further call fails with `GameOver`.
    pub fn submit_guess<D>(&mut self, word: &str, dictionary: &D) -> Result<GuessOutcome, GuessError>
    where
        D: Dictionary + ?Sized,
    {
        self.submit_guess_at(word, dictionary, Utc::now())
    }

    /// Like [`Game::submit_guess`], stamping `finished_at` with `now` on the final guess.
    pub fn submit_guess_at<D>(
        &mut self,
        word: &str,
        dictionary: &D,
        now: DateTime<Utc>,
    ) -> Result<GuessOutcome, GuessError>
    where
        D: Dictionary + ?Sized,
    {
        if self.is_done() {
            return Err(GuessError::GameOver);
        }

        let word = normalize_word(word);
        let length = word.chars().count();
        if length != WORD_LENGTH {
            return Err(GuessError::invalid_length(length));
        }

        if !dictionary.is_allowed_guess(&word) {
            return Err(GuessError::InvalidWord { word });
        }

        self.won = word == self.answer;
        self.guesses.push(word);

        if self.is_done() {
            self.finished_at = Some(now);
        }

        Ok(match self.state() {
            GameStatus::InProgress => GuessOutcome::Continue,
            GameStatus::Won => GuessOutcome::Won,
            GameStatus::Lost => GuessOutcome::Lost,
        })
    }

    pub fn is_done(&self) -> bool {
        self.won || self.guesses.len() >= MAX_GUESSES
    }

    pub fn state(&self) -> GameStatus {
        if self.won {
            GameStatus::Won
        } else if self.guesses.len() >= MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// Attach the storage key. Called by persistence after the first save.
    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    /// Feedback rows for every guess so far, oldest first.
    pub fn feedback(&self, policy: FeedbackPolicy) -> Vec<Vec<LetterResult>> {
        self.guesses
            .iter()
            .map(|guess| compute_feedback_with(policy, guess, &self.answer))
            .collect()
    }
}
