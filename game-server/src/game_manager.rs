use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use game_core::{
    DailyRotation, FeedbackPolicy, Game, RotationError, WordValidator, summarize,
};
use game_persistence::repositories::GameRepository;
use game_types::{GuessError, GuessOutcome, Statistics};

/// How a connecting player finds today's puzzle.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenedGame {
    /// No game for today's answer yet.
    Fresh(Game),
    /// Today's game was started earlier and is still in progress.
    Resumed(Game),
    /// Today's game is already finished.
    AlreadyPlayed(Game),
}

impl OpenedGame {
    pub fn game(&self) -> &Game {
        match self {
            OpenedGame::Fresh(game) | OpenedGame::Resumed(game) | OpenedGame::AlreadyPlayed(game) => {
                game
            }
        }
    }

    pub fn into_game(self) -> Game {
        match self {
            OpenedGame::Fresh(game) | OpenedGame::Resumed(game) | OpenedGame::AlreadyPlayed(game) => {
                game
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Rejected(#[from] GuessError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Daily puzzle state shared by every session.
pub struct GameManager {
    repository: GameRepository,
    word_validator: WordValidator,
    rotation: DailyRotation,
    feedback_policy: FeedbackPolicy,
}

impl GameManager {
    pub fn new(
        repository: GameRepository,
        word_validator: WordValidator,
        rotation: DailyRotation,
        feedback_policy: FeedbackPolicy,
    ) -> Self {
        info!(
            "Game manager ready with {} answers and {} allowed guesses",
            word_validator.answers().len(),
            word_validator.allowed_count()
        );

        Self {
            repository,
            word_validator,
            rotation,
            feedback_policy,
        }
    }

    pub fn feedback_policy(&self) -> FeedbackPolicy {
        self.feedback_policy
    }

    pub fn time_until_next(&self, now: DateTime<Utc>) -> TimeDelta {
        self.rotation.time_until_next(now)
    }

    pub fn todays_answer(&self, now: DateTime<Utc>) -> Result<&str, RotationError> {
        self.rotation.answer_at(now, self.word_validator.answers())
    }

    /// Resume or report today's game if the player has one, otherwise start fresh.
    pub async fn open_game(&self, player_key: &str, now: DateTime<Utc>) -> anyhow::Result<OpenedGame> {
        let answer = self.todays_answer(now)?;

        if let Some(game) = self.repository.latest_game(player_key).await? {
            // Answers repeat once the list wraps, so the day must match too
            let same_day = game.started_at().date_naive() == now.date_naive();
            if same_day && game.answer() == answer {
                debug!("Found today's game for {}", player_key);
                return Ok(if game.is_done() {
                    OpenedGame::AlreadyPlayed(game)
                } else {
                    OpenedGame::Resumed(game)
                });
            }
        }

        Ok(OpenedGame::Fresh(Game::new_at(answer, now)))
    }

    /// Submit one guess and persist the game when it was accepted.
    pub async fn play_turn(
        &self,
        player_key: &str,
        game: &mut Game,
        word: &str,
    ) -> Result<GuessOutcome, TurnError> {
        self.play_turn_at(player_key, game, word, Utc::now()).await
    }

    /// [`GameManager::play_turn`] with the clock supplied by the caller.
    pub async fn play_turn_at(
        &self,
        player_key: &str,
        game: &mut Game,
        word: &str,
        now: DateTime<Utc>,
    ) -> Result<GuessOutcome, TurnError> {
        let outcome = game.submit_guess_at(word, &self.word_validator, now)?;
        self.repository.save_game(player_key, game).await?;

        debug!(
            "{} guessed {} ({:?}, {} left)",
            player_key,
            word.trim(),
            outcome,
            game.remaining_guesses()
        );

        Ok(outcome)
    }

    pub async fn statistics(&self, player_key: &str) -> anyhow::Result<Statistics> {
        let history = self.repository.list_games(player_key).await?;
        Ok(summarize(&history))
    }
}
