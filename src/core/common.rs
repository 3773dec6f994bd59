//! Common value types shared by the engine: reports, error codes, directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub type GameId = String;
pub type PlayerId = String;
pub type VesselId = String;

/// Outcome of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackReport {
    /// Empty water with nothing nearby, or a hulk that was already sunk.
    Miss,
    /// A living vessel took damage and is still afloat.
    Hit,
    /// A living vessel took damage and sank.
    HitAndSunk,
    /// Empty water, but a living enemy vessel sits next to it.
    WaveHigh,
}

/// Outcome of a resolved move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveReport {
    MoveSuccess,
    /// No living vessel had a legal path. Still a valid turn.
    MoveBlocked,
}

/// Rule rejections. These travel inside a `TurnResult`, never as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    InvalidTurn,
    InvalidAction,
    InvalidTarget,
    InvalidMoveDistance,
    OutOfBoard,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidTurn => write!(f, "not your turn"),
            ErrorCode::InvalidAction => write!(f, "action is not allowed in the current state"),
            ErrorCode::InvalidTarget => write!(f, "target cannot be attacked from your position"),
            ErrorCode::InvalidMoveDistance => write!(f, "move distance must be 1 or 2"),
            ErrorCode::OutOfBoard => write!(f, "position is outside the board"),
        }
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Attack,
    Move,
}

/// Cardinal movement direction. North points towards y = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ErrorCode::InvalidAction),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Errors raised while setting up a board or a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Position lies outside the grid.
    OutOfBoard,
    /// A vessel with this identity is already on the board.
    DuplicateId(VesselId),
    /// Another vessel already occupies the cell.
    Occupied,
    /// Random placement ran out of attempts.
    UnableToPlace,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBoard => write!(f, "Vessel placement is out of bounds"),
            PlacementError::DuplicateId(id) => write!(f, "Vessel id '{}' is already in use", id),
            PlacementError::Occupied => write!(f, "Vessel placement overlaps another vessel"),
            PlacementError::UnableToPlace => write!(f, "Unable to place vessel"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Errors raised by game lifecycle operations outside of `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// `start` was called on a game that is not waiting.
    AlreadyStarted,
    /// A fleet is not completely placed.
    NotReady,
    Placement(PlacementError),
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Placement(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AlreadyStarted => write!(f, "Game has already started"),
            GameError::NotReady => write!(f, "Both fleets must be placed before starting"),
            GameError::Placement(e) => write!(f, "Placement error: {}", e),
        }
    }
}

impl std::error::Error for GameError {}
