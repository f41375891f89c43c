use game_types::{LetterResult, LetterStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::normalize_word;

/// How repeated letters in a guess are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedbackPolicy {
    /// A letter is `Present` whenever it occurs anywhere in the answer, so a
    /// repeated guess letter can be marked more than once against a single
    /// occurrence in the answer.
    #[default]
    Membership,
    /// Each answer letter justifies at most one `Correct` or `Present` mark.
    /// Exact matches are claimed first, then remaining occurrences left to right.
    Counted,
}

impl FromStr for FeedbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "membership" => Ok(FeedbackPolicy::Membership),
            "counted" => Ok(FeedbackPolicy::Counted),
            other => Err(format!("unknown feedback policy {:?}", other)),
        }
    }
}

/// Classify each letter of `guess` against `answer` using the membership rule.
pub fn compute_feedback(guess: &str, answer: &str) -> Vec<LetterResult> {
    compute_feedback_with(FeedbackPolicy::Membership, guess, answer)
}

pub fn compute_feedback_with(policy: FeedbackPolicy, guess: &str, answer: &str) -> Vec<LetterResult> {
    let guess_chars: Vec<char> = normalize_word(guess).chars().collect();
    let answer_chars: Vec<char> = normalize_word(answer).chars().collect();

    let statuses = match policy {
        FeedbackPolicy::Membership => membership_statuses(&guess_chars, &answer_chars),
        FeedbackPolicy::Counted => counted_statuses(&guess_chars, &answer_chars),
    };

    guess_chars
        .iter()
        .zip(statuses)
        .enumerate()
        .map(|(position, (&letter, status))| LetterResult {
            letter,
            status,
            position: position as u32,
        })
        .collect()
}

fn membership_statuses(guess: &[char], answer: &[char]) -> Vec<LetterStatus> {
    guess
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            if answer.get(i) == Some(ch) {
                LetterStatus::Correct
            } else if answer.contains(ch) {
                LetterStatus::Present
            } else {
                LetterStatus::Absent
            }
        })
        .collect()
}

fn counted_statuses(guess: &[char], answer: &[char]) -> Vec<LetterStatus> {
    let mut statuses = vec![LetterStatus::Absent; guess.len()];

    // Occurrences still available to justify a Present mark
    let mut remaining: HashMap<char, usize> = HashMap::new();
    for (i, ch) in answer.iter().enumerate() {
        if guess.get(i) != Some(ch) {
            *remaining.entry(*ch).or_insert(0) += 1;
        }
    }

    // First pass: exact positions
    for (i, ch) in guess.iter().enumerate() {
        if answer.get(i) == Some(ch) {
            statuses[i] = LetterStatus::Correct;
        }
    }

    // Second pass: present letters, consuming occurrences left to right
    for (i, ch) in guess.iter().enumerate() {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(ch) {
            if *count > 0 {
                *count -= 1;
                statuses[i] = LetterStatus::Present;
            }
        }
    }

    statuses
}
