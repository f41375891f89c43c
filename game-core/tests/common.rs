#![allow(dead_code)]

use game_core::{Game, WordValidator};
use game_types::{GuessOutcome, MAX_GUESSES};

/// Creates a test WordValidator with a known set of words
pub fn create_test_validator() -> WordValidator {
    let answers = "water\nwaste\ntreat\nonion\nhouse";
    let allowed = "teeth\nsalad\ngrape\nchili\ncrane\nslate\nmouse\nbread";
    WordValidator::from_word_lists(answers, allowed).expect("test word lists are valid")
}

/// Plays `guesses` in order, stopping at the first terminal outcome
pub fn play(answer: &str, guesses: &[&str]) -> (Game, Vec<GuessOutcome>) {
    let validator = create_test_validator();
    let mut game = Game::new(answer);
    let mut outcomes = Vec::new();

    for word in guesses {
        let outcome = game
            .submit_guess(word, &validator)
            .expect("guess accepted by test dictionary");
        outcomes.push(outcome);
        if outcome.is_game_over() {
            break;
        }
    }

    (game, outcomes)
}

/// A game won on attempt `attempts`
pub fn won_in(attempts: usize) -> Game {
    let mut guesses = vec!["teeth"; attempts - 1];
    guesses.push("water");
    play("water", &guesses).0
}

/// A game that used every attempt without finding the answer
pub fn lost_game() -> Game {
    play("water", &["teeth"; MAX_GUESSES]).0
}
