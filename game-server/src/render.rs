//! Terminal frames sent to players.

use chrono::TimeDelta;
use std::fmt::Write;

use game_core::{FeedbackPolicy, Game};
use game_types::{LetterStatus, MAX_GUESSES, Statistics, WORD_LENGTH};

pub const CLEAR: &str = "\x1b[H\x1b[2J";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, RESET)
}

/// Clears the screen and draws every guess followed by the unused rows.
pub fn board(game: &Game, policy: FeedbackPolicy) -> String {
    let mut frame = String::from(CLEAR);
    frame.push_str("    Wordle\n");

    for row in game.feedback(policy) {
        for result in row {
            let boxed = format!("[{}]", result.letter);
            match result.status {
                LetterStatus::Correct => frame.push_str(&paint(GREEN, &boxed)),
                LetterStatus::Present => frame.push_str(&paint(YELLOW, &boxed)),
                LetterStatus::Absent => frame.push_str(&boxed),
            }
        }
        frame.push('\n');
    }

    for _ in game.guesses().len()..MAX_GUESSES {
        frame.push_str(&"[ ]".repeat(WORD_LENGTH));
        frame.push('\n');
    }

    frame
}

/// A red line shown under the board.
pub fn warning(message: &str) -> String {
    format!("{}\n", paint(RED, message))
}

pub fn winner() -> String {
    format!("{}\n", paint(GREEN, "Winner!"))
}

pub fn reveal(answer: &str) -> String {
    format!("{}\n", paint(RED, answer))
}

pub fn statistics(stats: &Statistics, until_next: TimeDelta) -> String {
    let mut block = String::from("\n    Statistics\n");
    let _ = writeln!(block, "played..................{}", stats.played);
    let _ = writeln!(block, "win %...................{}", stats.win_percent);
    let _ = writeln!(block, "current streak..........{}", stats.current_streak);
    let _ = writeln!(block, "max streak..............{}", stats.max_streak);
    block.push_str("guess distribution.......\n");
    for (i, count) in stats.guess_distribution.iter().enumerate() {
        let _ = writeln!(block, "    {}...................{}", i + 1, count);
    }
    block.push_str(&next_rotation(until_next));
    block
}

pub fn next_rotation(until_next: TimeDelta) -> String {
    let total_minutes = until_next.num_minutes().max(0);
    format!(
        "\nNext Wordle in {} hours {} mins\n",
        total_minutes / 60,
        total_minutes % 60
    )
}
