//! Storage contracts the game service depends on.
//!
//! The engine never sees a lock: each store serialises access internally,
//! keyed by game id, and hands out owned copies.

use crate::core::{Game, PredictionBoard, TurnLog};

pub mod in_memory;

pub use in_memory::{
    InMemoryGameStore, InMemoryPlayerGamesIndex, InMemoryPredictionStore, InMemoryTurnLogStore,
};

pub trait GameStore: Send + Sync {
    fn save(&self, game: &Game) -> anyhow::Result<()>;
    /// Independent copy of the stored game, if any.
    fn find_by_id(&self, game_id: &str) -> anyhow::Result<Option<Game>>;
}

pub trait TurnLogStore: Send + Sync {
    fn append(&self, game_id: &str, entry: TurnLog) -> anyhow::Result<()>;
    /// Entries in insertion order.
    fn find_by_game_id(&self, game_id: &str) -> anyhow::Result<Vec<TurnLog>>;
}

pub trait PredictionStore: Send + Sync {
    fn save(&self, game_id: &str, player_id: &str, board: &PredictionBoard) -> anyhow::Result<()>;
    fn find(&self, game_id: &str, player_id: &str) -> anyhow::Result<Option<PredictionBoard>>;
}

pub trait PlayerGamesIndex: Send + Sync {
    fn add_game(&self, player_id: &str, game_id: &str) -> anyhow::Result<()>;
    fn list_games(&self, player_id: &str) -> anyhow::Result<Vec<String>>;
}
