use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::game_manager::{GameManager, OpenedGame, TurnError};
use crate::render;
use game_core::Game;
use game_types::GuessOutcome;

/// Frames to send back for one step of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReply {
    pub frames: Vec<String>,
    /// The session has nothing more to accept and the connection should close.
    pub closed: bool,
}

impl SessionReply {
    fn open(frames: Vec<String>) -> Self {
        Self {
            frames,
            closed: false,
        }
    }

    fn closing(frames: Vec<String>) -> Self {
        Self {
            frames,
            closed: true,
        }
    }
}

/// One player's turn loop, independent of the transport carrying it.
pub struct Session {
    manager: Arc<GameManager>,
    player_key: String,
    game: Game,
    closed: bool,
}

impl Session {
    pub async fn begin(
        manager: Arc<GameManager>,
        player_key: String,
        now: DateTime<Utc>,
    ) -> anyhow::Result<(Self, SessionReply)> {
        let opened = manager.open_game(&player_key, now).await?;
        let already_played = matches!(opened, OpenedGame::AlreadyPlayed(_));
        if let OpenedGame::Resumed(game) = &opened {
            info!("{} resumed today's game at guess {}", player_key, game.guesses().len() + 1);
        }

        let session = Self {
            manager,
            player_key,
            game: opened.into_game(),
            closed: already_played,
        };

        let reply = if already_played {
            SessionReply::closing(vec![session.final_frame("", now).await?])
        } else {
            SessionReply::open(vec![session.board()])
        };

        Ok((session, reply))
    }

    pub fn player_key(&self) -> &str {
        &self.player_key
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Treat `line` as a guess. Storage failures end the session with an error.
    ///
    /// Every reply is a single frame that starts by clearing the screen, so any
    /// message is drawn below the board rather than in a frame of its own.
    pub async fn handle_line(&mut self, line: &str, now: DateTime<Utc>) -> anyhow::Result<SessionReply> {
        if self.closed {
            return Ok(SessionReply::closing(Vec::new()));
        }

        let outcome = match self
            .manager
            .play_turn_at(&self.player_key, &mut self.game, line, now)
            .await
        {
            Ok(outcome) => outcome,
            Err(TurnError::Rejected(err)) => {
                let mut frame = self.board();
                frame.push_str(&render::warning(&err.to_string()));
                return Ok(SessionReply::open(vec![frame]));
            }
            Err(TurnError::Storage(err)) => return Err(err),
        };

        let reply = match outcome {
            GuessOutcome::Continue => SessionReply::open(vec![self.board()]),
            GuessOutcome::Won => {
                info!("{} won in {} guesses", self.player_key, self.game.guesses().len());
                SessionReply::closing(vec![self.final_frame(&render::winner(), now).await?])
            }
            GuessOutcome::Lost => {
                info!("{} lost, answer was {}", self.player_key, self.game.answer());
                let reveal = render::reveal(self.game.answer());
                SessionReply::closing(vec![self.final_frame(&reveal, now).await?])
            }
        };

        self.closed = reply.closed;
        Ok(reply)
    }

    fn board(&self) -> String {
        render::board(&self.game, self.manager.feedback_policy())
    }

    /// The finished board, `banner` under it, then the player's statistics.
    async fn final_frame(&self, banner: &str, now: DateTime<Utc>) -> anyhow::Result<String> {
        let stats = self.manager.statistics(&self.player_key).await?;
        let mut frame = self.board();
        frame.push_str(banner);
        frame.push_str(&render::statistics(&stats, self.manager.time_until_next(now)));
        Ok(frame)
    }
}
