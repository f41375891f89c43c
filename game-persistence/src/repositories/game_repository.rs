use anyhow::{Context, Result};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::debug;

use crate::entities::{games, prelude::*};
use game_core::{Game, PlayerHistory};

/// Stores game snapshots per player.
#[derive(Clone)]
pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_game(model: games::Model) -> Result<Game> {
        let mut game: Game = serde_json::from_str(&model.data)
            .with_context(|| format!("failed to decode stored game {}", model.id))?;
        game.set_id(model.id);
        Ok(game)
    }

    /// Insert the game on first save, update the same row afterwards.
    pub async fn save_game(&self, player_key: &str, game: &mut Game) -> Result<i32> {
        let data = serde_json::to_string(game).context("failed to encode game")?;
        let now = chrono::Utc::now().into();

        match game.id() {
            Some(id) => {
                let game_model = games::ActiveModel {
                    id: ActiveValue::Unchanged(id),
                    data: ActiveValue::Set(data),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };

                Games::update(game_model)
                    .exec(&self.db)
                    .await
                    .with_context(|| format!("failed to update game {}", id))?;

                debug!("Updated game {} for {}", id, player_key);
                Ok(id)
            }
            None => {
                let game_model = games::ActiveModel {
                    id: ActiveValue::NotSet,
                    player_key: ActiveValue::Set(player_key.to_string()),
                    answer: ActiveValue::Set(game.answer().to_string()),
                    data: ActiveValue::Set(data),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                };

                let inserted = Games::insert(game_model)
                    .exec(&self.db)
                    .await
                    .context("failed to insert game")?;

                game.set_id(inserted.last_insert_id);
                debug!("Inserted game {} for {}", inserted.last_insert_id, player_key);
                Ok(inserted.last_insert_id)
            }
        }
    }

    /// Every game the player has saved, newest first.
    pub async fn list_games(&self, player_key: &str) -> Result<PlayerHistory> {
        let models = Games::find()
            .filter(games::Column::PlayerKey.eq(player_key))
            .order_by_desc(games::Column::Id)
            .all(&self.db)
            .await?;

        let games = models
            .into_iter()
            .map(Self::model_to_game)
            .collect::<Result<Vec<_>>>()?;

        Ok(PlayerHistory::newest_first(games))
    }

    pub async fn latest_game(&self, player_key: &str) -> Result<Option<Game>> {
        let model = Games::find()
            .filter(games::Column::PlayerKey.eq(player_key))
            .order_by_desc(games::Column::Id)
            .one(&self.db)
            .await?;

        model.map(Self::model_to_game).transpose()
    }

    pub async fn count_games(&self, player_key: &str) -> Result<u64> {
        let count = Games::find()
            .filter(games::Column::PlayerKey.eq(player_key))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
