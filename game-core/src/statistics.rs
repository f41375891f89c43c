//! Lifetime statistics over a player's past games.
//!
//! Every function here is a pure function of the history it is given.

use game_types::{MAX_GUESSES, Statistics};

use crate::Game;

/// A player's games, stored oldest first regardless of how they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerHistory {
    games: Vec<Game>,
}

impl PlayerHistory {
    /// Build from games ordered oldest to newest.
    pub fn oldest_first(games: Vec<Game>) -> Self {
        Self { games }
    }

    /// Build from games ordered newest to oldest, as storage returns them.
    pub fn newest_first(mut games: Vec<Game>) -> Self {
        games.reverse();
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games in the order they were played.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &Game> {
        self.games.iter()
    }

    pub fn most_recent_first(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().rev()
    }

    pub fn latest(&self) -> Option<&Game> {
        self.games.last()
    }
}

pub fn played(history: &PlayerHistory) -> u32 {
    history.len() as u32
}

/// Percentage of games won, rounded down. Zero for an empty history.
pub fn win_percent(history: &PlayerHistory) -> u32 {
    let total = history.len() as u64;
    if total == 0 {
        return 0;
    }

    let wins = history.chronological().filter(|game| game.won()).count() as u64;
    (wins * 100 / total) as u32
}

pub fn current_streak(history: &PlayerHistory) -> u32 {
    history
        .most_recent_first()
        .take_while(|game| game.won())
        .count() as u32
}

pub fn max_streak(history: &PlayerHistory) -> u32 {
    let (_, best) = history
        .chronological()
        .fold((0u32, 0u32), |(streak, best), game| {
            if game.won() {
                let streak = streak + 1;
                (streak, best.max(streak))
            } else {
                (0, best)
            }
        });
    best
}

/// Won games bucketed by attempts used; index `i` holds wins in `i + 1` guesses.
pub fn guess_distribution(history: &PlayerHistory) -> Vec<u32> {
    let mut distribution = vec![0; MAX_GUESSES];

    for game in history.chronological().filter(|game| game.won()) {
        // Stored snapshots are trusted only as far as the bucket range
        match game.guesses().len() {
            attempts @ 1..=MAX_GUESSES => distribution[attempts - 1] += 1,
            _ => continue,
        }
    }

    distribution
}

pub fn summarize(history: &PlayerHistory) -> Statistics {
    Statistics {
        played: played(history),
        win_percent: win_percent(history),
        current_streak: current_streak(history),
        max_streak: max_streak(history),
        guess_distribution: guess_distribution(history),
    }
}
