//! Turn state machine wrapping one board.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::common::{
    ActionType, AttackReport, Direction, ErrorCode, GameError, GameId, GameStatus, MoveReport,
    PlayerId,
};
use crate::core::config::FLEET_SIZE;

/// Raw grid coordinates as submitted by a player; may lie outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A well-formed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Attack { target: Coordinates },
    Move { direction: Direction, distance: i32 },
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Attack { .. } => ActionType::Attack,
            Action::Move { .. } => ActionType::Move,
        }
    }
}

/// An action attributed to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCommand {
    pub player_id: PlayerId,
    pub action: Action,
}

impl ActionCommand {
    pub fn attack(player_id: impl Into<PlayerId>, x: i32, y: i32) -> Self {
        Self {
            player_id: player_id.into(),
            action: Action::Attack {
                target: Coordinates::new(x, y),
            },
        }
    }

    pub fn movement(player_id: impl Into<PlayerId>, direction: Direction, distance: i32) -> Self {
        Self {
            player_id: player_id.into(),
            action: Action::Move {
                direction,
                distance,
            },
        }
    }
}

/// Action as submitted over the wire: parameters are optional and may not
/// match the action type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub action_type: ActionType,
    #[serde(default)]
    pub target: Option<Coordinates>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub distance: Option<i32>,
}

impl ActionRequest {
    pub fn from_command(game_id: impl Into<GameId>, command: &ActionCommand) -> Self {
        let (target, direction, distance) = match command.action {
            Action::Attack { target } => (Some(target), None, None),
            Action::Move {
                direction,
                distance,
            } => (None, Some(direction), Some(distance)),
        };
        Self {
            game_id: game_id.into(),
            player_id: command.player_id.clone(),
            action_type: command.action.action_type(),
            target,
            direction,
            distance,
        }
    }

    /// Check the parameter combination and build a command.
    pub fn to_command(&self) -> Result<ActionCommand, ErrorCode> {
        let action = match self.action_type {
            ActionType::Attack => {
                if self.direction.is_some() || self.distance.is_some() {
                    return Err(ErrorCode::InvalidAction);
                }
                let target = self.target.ok_or(ErrorCode::InvalidTarget)?;
                Action::Attack { target }
            }
            ActionType::Move => {
                if self.target.is_some() {
                    return Err(ErrorCode::InvalidAction);
                }
                let direction = self.direction.ok_or(ErrorCode::InvalidAction)?;
                let distance = self.distance.ok_or(ErrorCode::InvalidMoveDistance)?;
                Action::Move {
                    direction,
                    distance,
                }
            }
        };
        Ok(ActionCommand {
            player_id: self.player_id.clone(),
            action,
        })
    }
}

/// Outcome of one `apply`. At most one of the three report/error fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub attack_report: Option<AttackReport>,
    pub move_report: Option<MoveReport>,
    pub error_code: Option<ErrorCode>,
    pub next_player_id: Option<PlayerId>,
    pub winner_id: Option<PlayerId>,
    pub status: GameStatus,
}

impl TurnResult {
    pub fn is_rejected(&self) -> bool {
        self.error_code.is_some()
    }
}

/// Append-only audit record of one submitted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnLog {
    pub turn: u32,
    pub player_id: PlayerId,
    pub action_type: ActionType,
    pub target: Option<Coordinates>,
    pub direction: Option<Direction>,
    pub distance: Option<i32>,
    pub attack_report: Option<AttackReport>,
    pub move_report: Option<MoveReport>,
    pub error_code: Option<ErrorCode>,
    pub created_at: u64,
}

impl TurnLog {
    pub fn new(turn: u32, request: &ActionRequest, result: &TurnResult, created_at: u64) -> Self {
        Self {
            turn,
            player_id: request.player_id.clone(),
            action_type: request.action_type,
            target: request.target,
            direction: request.direction,
            distance: request.distance,
            attack_report: result.attack_report,
            move_report: result.move_report,
            error_code: result.error_code,
            created_at,
        }
    }
}

/// A two-player game and its board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: GameId,
    status: GameStatus,
    turn: u32,
    player_a: PlayerId,
    player_b: PlayerId,
    current_player: Option<PlayerId>,
    winner: Option<PlayerId>,
    board: Board,
    created_at: u64,
    updated_at: u64,
}

impl Game {
    /// Create a game waiting for both fleets to be placed.
    pub fn new(
        id: impl Into<GameId>,
        player_a: impl Into<PlayerId>,
        player_b: impl Into<PlayerId>,
        now: u64,
    ) -> Self {
        Self {
            id: id.into(),
            status: GameStatus::Waiting,
            turn: 0,
            player_a: player_a.into(),
            player_b: player_b.into(),
            current_player: None,
            winner: None,
            board: Board::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Start a game on a prepared board of any fleet size, player A to act.
    pub fn with_board(
        id: impl Into<GameId>,
        player_a: impl Into<PlayerId>,
        player_b: impl Into<PlayerId>,
        board: Board,
        now: u64,
    ) -> Self {
        let mut game = Self::new(id, player_a, player_b, now);
        game.board = board;
        game.status = GameStatus::InProgress;
        game.turn = 1;
        game.current_player = Some(game.player_a.clone());
        game
    }

    /// Board access for fleet placement. Only available while waiting.
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        match self.status {
            GameStatus::Waiting => Some(&mut self.board),
            _ => None,
        }
    }

    /// Waiting -> InProgress. Player A acts first.
    pub fn start(&mut self, now: u64) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        let placed = |p: &str| self.board.fleet_of(p).count() == FLEET_SIZE;
        if !placed(&self.player_a) || !placed(&self.player_b) {
            return Err(GameError::NotReady);
        }
        self.status = GameStatus::InProgress;
        self.turn = 1;
        self.current_player = Some(self.player_a.clone());
        self.updated_at = now;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn players(&self) -> (&str, &str) {
        (&self.player_a, &self.player_b)
    }

    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn is_participant(&self, player: &str) -> bool {
        player == self.player_a || player == self.player_b
    }

    /// The other seat. Non-participants are paired with player A.
    pub fn opponent_of(&self, player: &str) -> &str {
        if player == self.player_a {
            &self.player_b
        } else {
            &self.player_a
        }
    }

    /// Status and turn-ownership gate applied before any action.
    pub fn check_turn(&self, player: &str) -> Result<(), ErrorCode> {
        if self.status != GameStatus::InProgress {
            return Err(ErrorCode::InvalidAction);
        }
        if self.current_player.as_deref() != Some(player) {
            return Err(ErrorCode::InvalidTurn);
        }
        Ok(())
    }

    /// Apply a raw request. Parameter mismatches are reported after the turn gate.
    pub fn apply_request(&mut self, request: &ActionRequest, now: u64) -> TurnResult {
        match self
            .check_turn(&request.player_id)
            .and_then(|()| request.to_command())
        {
            Ok(command) => self.apply(&command, now),
            Err(code) => self.rejection(code),
        }
    }

    /// Apply one action. Rejections leave the game untouched.
    pub fn apply(&mut self, command: &ActionCommand, now: u64) -> TurnResult {
        if let Err(code) = self.check_turn(&command.player_id) {
            return self.rejection(code);
        }
        let player = command.player_id.as_str();

        let (attack_report, move_report) = match command.action {
            Action::Attack { target } => match self.board.attack(player, target.x, target.y) {
                Ok(report) => (Some(report), None),
                Err(code) => return self.rejection(code),
            },
            Action::Move {
                direction,
                distance,
            } => match self.board.move_fleet(player, direction, distance) {
                Ok(report) => (None, Some(report)),
                Err(code) => return self.rejection(code),
            },
        };

        let opponent = self.opponent_of(player).to_string();
        if self.board.remaining_strength(&opponent) == 0 {
            self.status = GameStatus::Finished;
            self.winner = Some(command.player_id.clone());
            self.current_player = None;
        } else {
            self.current_player = Some(opponent);
            self.turn += 1;
        }
        self.updated_at = now;

        TurnResult {
            attack_report,
            move_report,
            error_code: None,
            next_player_id: self.current_player.clone(),
            winner_id: self.winner.clone(),
            status: self.status,
        }
    }

    fn rejection(&self, code: ErrorCode) -> TurnResult {
        TurnResult {
            attack_report: None,
            move_report: None,
            error_code: Some(code),
            next_player_id: self.current_player.clone(),
            winner_id: self.winner.clone(),
            status: self.status,
        }
    }
}
