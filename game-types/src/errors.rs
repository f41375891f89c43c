use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::WORD_LENGTH;

/// Reasons a submitted guess was not recorded.
///
/// None of these consume an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GuessError {
    #[error("word must be {expected} letters")]
    InvalidLength { expected: u32, actual: u32 },
    #[error("invalid word {word:?}")]
    InvalidWord { word: String },
    #[error("game over")]
    GameOver,
}

impl GuessError {
    pub fn invalid_length(actual: usize) -> Self {
        GuessError::InvalidLength {
            expected: WORD_LENGTH as u32,
            actual: actual as u32,
        }
    }
}
