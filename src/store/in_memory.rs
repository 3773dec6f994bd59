use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use anyhow::anyhow;

use crate::core::{Game, GameId, PlayerId, PredictionBoard, TurnLog};
use crate::store::{GameStore, PlayerGamesIndex, PredictionStore, TurnLogStore};

type Slot<T> = Arc<RwLock<T>>;

/// Two-level map: the outer lock is only held to find or create a slot, the
/// slot lock guards one game.
struct Slots<T> {
    slots: RwLock<HashMap<String, Slot<T>>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Slots<T> {
    fn get(&self, key: &str) -> anyhow::Result<Option<Slot<T>>> {
        let slots = self.slots.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn get_or_insert_with(&self, key: &str, init: impl FnOnce() -> T) -> anyhow::Result<Slot<T>> {
        if let Some(slot) = self.get(key)? {
            return Ok(slot);
        }
        let mut slots = self.slots.write().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(init())))
            .clone())
    }

    fn read<R>(&self, key: &str, f: impl FnOnce(&T) -> R) -> anyhow::Result<Option<R>> {
        match self.get(key)? {
            Some(slot) => {
                let value = slot.read().map_err(|_| anyhow!("slot lock poisoned"))?;
                Ok(Some(f(&*value)))
            }
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, init: impl FnOnce() -> T, f: impl FnOnce(&mut T)) -> anyhow::Result<()> {
        let slot = self.get_or_insert_with(key, init)?;
        let mut value = slot.write().map_err(|_| anyhow!("slot lock poisoned"))?;
        f(&mut *value);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryGameStore {
    games: Slots<Game>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryGameStore {
    fn save(&self, game: &Game) -> anyhow::Result<()> {
        self.games
            .write(game.id(), || game.clone(), |stored| *stored = game.clone())
    }

    fn find_by_id(&self, game_id: &str) -> anyhow::Result<Option<Game>> {
        self.games.read(game_id, Game::clone)
    }
}

#[derive(Default)]
pub struct InMemoryTurnLogStore {
    logs: Slots<Vec<TurnLog>>,
}

impl InMemoryTurnLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TurnLogStore for InMemoryTurnLogStore {
    fn append(&self, game_id: &str, entry: TurnLog) -> anyhow::Result<()> {
        self.logs.write(game_id, Vec::new, |logs| logs.push(entry))
    }

    fn find_by_game_id(&self, game_id: &str) -> anyhow::Result<Vec<TurnLog>> {
        Ok(self.logs.read(game_id, Vec::clone)?.unwrap_or_default())
    }
}

/// Prediction boards keyed by `(game, viewer)`.
#[derive(Default)]
pub struct InMemoryPredictionStore {
    boards: Slots<HashMap<PlayerId, PredictionBoard>>,
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PredictionStore for InMemoryPredictionStore {
    fn save(&self, game_id: &str, player_id: &str, board: &PredictionBoard) -> anyhow::Result<()> {
        self.boards.write(game_id, HashMap::new, |boards| {
            boards.insert(player_id.to_string(), board.clone());
        })
    }

    fn find(&self, game_id: &str, player_id: &str) -> anyhow::Result<Option<PredictionBoard>> {
        Ok(self
            .boards
            .read(game_id, |boards| boards.get(player_id).cloned())?
            .flatten())
    }
}

#[derive(Default)]
pub struct InMemoryPlayerGamesIndex {
    index: RwLock<HashMap<PlayerId, BTreeSet<GameId>>>,
}

impl InMemoryPlayerGamesIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerGamesIndex for InMemoryPlayerGamesIndex {
    fn add_game(&self, player_id: &str, game_id: &str) -> anyhow::Result<()> {
        let mut index = self.index.write().map_err(|_| anyhow!("index lock poisoned"))?;
        index
            .entry(player_id.to_string())
            .or_default()
            .insert(game_id.to_string());
        Ok(())
    }

    fn list_games(&self, player_id: &str) -> anyhow::Result<Vec<String>> {
        let index = self.index.read().map_err(|_| anyhow!("index lock poisoned"))?;
        Ok(index
            .get(player_id)
            .map(|games| games.iter().cloned().collect())
            .unwrap_or_default())
    }
}
