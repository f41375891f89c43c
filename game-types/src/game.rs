use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of attempts a player gets per puzzle.
pub const MAX_GUESSES: usize = 6;

/// Length of every answer and every accepted guess.
pub const WORD_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What an accepted guess did to the game.
///
/// `Won` and `Lost` are the terminal transitions: the guess was recorded and
/// no further guesses will be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessOutcome {
    Continue,
    Won,
    Lost,
}

impl GuessOutcome {
    pub fn won(&self) -> bool {
        matches!(self, GuessOutcome::Won)
    }

    /// The game-over signal, raised by the guess that ends the game.
    pub fn is_game_over(&self) -> bool {
        matches!(self, GuessOutcome::Won | GuessOutcome::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterResult {
    pub letter: char,
    pub status: LetterStatus,
    pub position: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LetterStatus {
    Correct, // Green - correct letter in correct position
    Present, // Yellow - letter elsewhere in the answer
    Absent,  // Plain - letter not in the answer
}
