//! Game service: loads a game, applies actions, records the audit trail and
//! prediction grids, and plays automated seats.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::core::{
    decide_action, is_automated, ActionRequest, ActionType, AttackReport, Clock, ErrorCode, Game,
    GameId, GameStatus, MoveReport, PlayerId, Position, PredictionBoard, SystemClock, TurnLog,
    TurnResult, Vessel, AUTOMATED_PLY_LIMIT,
};
use crate::store::{
    GameStore, InMemoryGameStore, InMemoryPlayerGamesIndex, InMemoryPredictionStore,
    InMemoryTurnLogStore, PlayerGamesIndex, PredictionStore, TurnLogStore,
};

/// Failures that are not rule rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Player ids are empty or identical.
    InvalidPlayers,
    GameNotFound(GameId),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidPlayers => write!(f, "two distinct, non-empty player ids are required"),
            ServiceError::GameNotFound(id) => write!(f, "game '{}' not found", id),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The four collaborators the service persists through.
#[derive(Clone)]
pub struct Stores {
    pub games: Arc<dyn GameStore>,
    pub turn_logs: Arc<dyn TurnLogStore>,
    pub predictions: Arc<dyn PredictionStore>,
    pub player_games: Arc<dyn PlayerGamesIndex>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            games: Arc::new(InMemoryGameStore::new()),
            turn_logs: Arc::new(InMemoryTurnLogStore::new()),
            predictions: Arc::new(InMemoryPredictionStore::new()),
            player_games: Arc::new(InMemoryPlayerGamesIndex::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    pub game_id: GameId,
    pub status: GameStatus,
    pub turn: u32,
    pub current_player_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub game_id: GameId,
    pub turn: u32,
    pub attack_report: Option<AttackReport>,
    pub move_report: Option<MoveReport>,
    pub error_code: Option<ErrorCode>,
    pub next_player_id: Option<PlayerId>,
    pub winner_id: Option<PlayerId>,
    pub status: GameStatus,
}

impl ActionResponse {
    fn new(game: &Game, result: TurnResult) -> Self {
        Self {
            game_id: game.id().to_string(),
            turn: game.turn(),
            attack_report: result.attack_report,
            move_report: result.move_report,
            error_code: result.error_code,
            next_player_id: result.next_player_id,
            winner_id: result.winner_id,
            status: result.status,
        }
    }

    /// Keep the caller's own report but show the latest game position.
    fn refresh(&mut self, game: &Game) {
        self.turn = game.turn();
        self.next_player_id = game.current_player().map(str::to_string);
        self.winner_id = game.winner().map(str::to_string);
        self.status = game.status();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselView {
    pub id: String,
    pub owner_id: PlayerId,
    pub x: i32,
    pub y: i32,
    pub strength: u32,
    pub sunk: bool,
}

impl From<&Vessel> for VesselView {
    fn from(v: &Vessel) -> Self {
        Self {
            id: v.id().to_string(),
            owner_id: v.owner().to_string(),
            x: v.position().x(),
            y: v.position().y(),
            strength: v.strength(),
            sunk: v.is_sunk(),
        }
    }
}

/// Snapshot of a game for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub game_id: GameId,
    pub turn: u32,
    pub status: GameStatus,
    pub current_player_id: Option<PlayerId>,
    pub viewer_id: PlayerId,
    pub opponent_id: PlayerId,
    pub winner_id: Option<PlayerId>,
    pub vessels: Vec<VesselView>,
    pub prediction_board: PredictionBoard,
    pub logs: Vec<TurnLog>,
}

impl GameStateView {
    pub fn vessel_at(&self, position: Position) -> Option<&VesselView> {
        self.vessels
            .iter()
            .find(|v| v.x == position.x() && v.y == position.y())
    }
}

pub struct GameService {
    stores: Stores,
    clock: Arc<dyn Clock>,
    rng: Mutex<SmallRng>,
    next_id: AtomicU64,
    /// One lock per game id; a request holds it from load to the end of the
    /// automated chain.
    game_locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl GameService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, rng: SmallRng) -> Self {
        Self {
            stores,
            clock,
            rng: Mutex::new(rng),
            next_id: AtomicU64::new(1),
            game_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Service over in-memory stores and the wall clock.
    pub fn in_memory(rng: SmallRng) -> Self {
        Self::new(Stores::in_memory(), Arc::new(SystemClock), rng)
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Create a game, place both fleets and start it. If player A is automated
    /// its opening moves are played straight away.
    pub fn initialize_game(&self, player_a: &str, player_b: &str) -> anyhow::Result<InitializeResponse> {
        let (player_a, player_b) = (player_a.trim(), player_b.trim());
        if player_a.is_empty() || player_b.is_empty() || player_a == player_b {
            return Err(ServiceError::InvalidPlayers.into());
        }

        let id = format!("game-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = self.clock.now();
        let mut game = Game::new(id, player_a, player_b, now);
        {
            let mut rng = self.rng.lock().map_err(|_| anyhow!("rng lock poisoned"))?;
            let board = game
                .board_mut()
                .ok_or_else(|| anyhow!("new game is not accepting placements"))?;
            board.random_placement(&mut *rng, player_a)?;
            board.random_placement(&mut *rng, player_b)?;
        }
        game.start(now)?;

        let lock = self.game_lock(game.id())?;
        let _held = lock.lock().map_err(|_| anyhow!("game lock poisoned"))?;
        self.stores.games.save(&game)?;
        self.stores.player_games.add_game(player_a, game.id())?;
        self.stores.player_games.add_game(player_b, game.id())?;
        info!("created {} ({} vs {})", game.id(), player_a, player_b);

        self.run_automated(&mut game)?;
        Ok(InitializeResponse {
            game_id: game.id().to_string(),
            status: game.status(),
            turn: game.turn(),
            current_player_id: game.current_player().map(str::to_string),
        })
    }

    /// Apply a player's action, then let any automated seat reply.
    pub fn execute_action(&self, request: &ActionRequest) -> anyhow::Result<ActionResponse> {
        let lock = self.game_lock(&request.game_id)?;
        let _held = lock.lock().map_err(|_| anyhow!("game lock poisoned"))?;
        let mut game = self.load(&request.game_id)?;
        let result = self.play(&mut game, request)?;
        let rejected = result.is_rejected();
        let mut response = ActionResponse::new(&game, result);
        if !rejected {
            self.run_automated(&mut game)?;
            response.refresh(&game);
        }
        Ok(response)
    }

    /// Snapshot for `viewer`, including their prediction grid and the log.
    pub fn game_state(&self, game_id: &str, viewer: &str) -> anyhow::Result<GameStateView> {
        let lock = self.game_lock(game_id)?;
        let _held = lock.lock().map_err(|_| anyhow!("game lock poisoned"))?;
        let game = self.load(game_id)?;
        let logs = self.stores.turn_logs.find_by_game_id(game_id)?;
        let prediction_board = match self.stores.predictions.find(game_id, viewer)? {
            Some(board) => board,
            None => PredictionBoard::new(self.clock.now()),
        };
        Ok(GameStateView {
            game_id: game.id().to_string(),
            turn: game.turn(),
            status: game.status(),
            current_player_id: game.current_player().map(str::to_string),
            viewer_id: viewer.to_string(),
            opponent_id: game.opponent_of(viewer).to_string(),
            winner_id: game.winner().map(str::to_string),
            vessels: game.board().vessels().map(VesselView::from).collect(),
            prediction_board,
            logs,
        })
    }

    /// Continue automated play on a stored game, e.g. when both seats are
    /// automated and the previous chain hit the ply limit.
    pub fn resume_automated(&self, game_id: &str) -> anyhow::Result<GameStatus> {
        let lock = self.game_lock(game_id)?;
        let _held = lock.lock().map_err(|_| anyhow!("game lock poisoned"))?;
        let mut game = self.load(game_id)?;
        self.run_automated(&mut game)?;
        Ok(game.status())
    }

    pub fn list_games(&self, player: &str) -> anyhow::Result<Vec<GameId>> {
        self.stores.player_games.list_games(player)
    }

    fn game_lock(&self, game_id: &str) -> anyhow::Result<Arc<Mutex<()>>> {
        let mut locks = self
            .game_locks
            .lock()
            .map_err(|_| anyhow!("game lock table poisoned"))?;
        Ok(Arc::clone(locks.entry(game_id.to_string()).or_default()))
    }

    fn load(&self, game_id: &str) -> anyhow::Result<Game> {
        self.stores
            .games
            .find_by_id(game_id)?
            .ok_or_else(|| ServiceError::GameNotFound(game_id.to_string()).into())
    }

    /// One ply: apply, log, persist, update the attacker's prediction grid.
    fn play(&self, game: &mut Game, request: &ActionRequest) -> anyhow::Result<TurnResult> {
        let turn = game.turn();
        let now = self.clock.now();
        let result = game.apply_request(request, now);
        self.stores
            .turn_logs
            .append(game.id(), TurnLog::new(turn, request, &result, now))?;

        match result.error_code {
            None => {
                self.stores.games.save(game)?;
                debug!(
                    "{} turn {}: {} {:?} -> {:?}{:?}",
                    game.id(),
                    turn,
                    request.player_id,
                    request.action_type,
                    result.attack_report,
                    result.move_report
                );
                if let Some(winner) = &result.winner_id {
                    info!("{} finished on turn {}, winner {}", game.id(), turn, winner);
                }
            }
            Some(code) => info!(
                "{} turn {}: rejected {:?} from {}: {}",
                game.id(),
                turn,
                request.action_type,
                request.player_id,
                code
            ),
        }

        self.record_prediction(game.id(), request, &result, now)?;
        Ok(result)
    }

    /// Successful attacks and in-range rejections (empty water out of reach)
    /// feed the attacker's grid; turn-gate rejections never do.
    fn record_prediction(
        &self,
        game_id: &str,
        request: &ActionRequest,
        result: &TurnResult,
        now: u64,
    ) -> anyhow::Result<()> {
        if request.action_type != ActionType::Attack {
            return Ok(());
        }
        let Some(target) = request
            .target
            .and_then(|t| Position::new(t.x, t.y).ok())
        else {
            return Ok(());
        };
        match result.error_code {
            None | Some(ErrorCode::InvalidTarget) => {}
            Some(_) => return Ok(()),
        }
        let mut board = self
            .stores
            .predictions
            .find(game_id, &request.player_id)?
            .unwrap_or_else(|| PredictionBoard::new(now));
        board.record(target, result.attack_report, now);
        self.stores
            .predictions
            .save(game_id, &request.player_id, &board)
    }

    /// Let automated seats act until a human is to move or the game ends.
    fn run_automated(&self, game: &mut Game) -> anyhow::Result<()> {
        let mut plies = 0;
        while game.current_player().is_some_and(is_automated) {
            if plies >= AUTOMATED_PLY_LIMIT {
                warn!("{}: automated play stopped after {} plies", game.id(), plies);
                break;
            }
            plies += 1;
            let command = {
                let mut rng = self.rng.lock().map_err(|_| anyhow!("rng lock poisoned"))?;
                decide_action(game, &mut *rng)
            };
            let Some(command) = command else { break };
            let request = ActionRequest::from_command(game.id(), &command);
            let result = self.play(game, &request)?;
            if let Some(code) = result.error_code {
                warn!("{}: automated seat {} rejected: {}", game.id(), command.player_id, code);
                break;
            }
        }
        Ok(())
    }
}
