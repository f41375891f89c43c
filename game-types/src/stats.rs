use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifetime statistics shown after a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Statistics {
    pub played: u32,
    pub win_percent: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Index `i` counts games won in exactly `i + 1` guesses.
    pub guess_distribution: Vec<u32>,
}
