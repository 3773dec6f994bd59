//! Core game engine: grid, vessels, board resolution, turn state machine and
//! the automated-opponent and prediction heuristics.
//!
//! Nothing in here performs I/O. Randomness and time are always passed in.

pub mod ai;
pub mod board;
pub mod clock;
pub mod common;
pub mod config;
pub mod game;
pub mod position;
pub mod prediction;
pub mod vessel;

// Re-export commonly used types
pub use ai::{decide_action, find_adjacent_target, random_move};
pub use board::Board;
pub use clock::{Clock, FixedClock, SystemClock};
pub use common::{
    ActionType, AttackReport, Direction, ErrorCode, GameError, GameId, GameStatus, MoveReport,
    PlacementError, PlayerId, VesselId,
};
pub use config::*;
pub use game::{Action, ActionCommand, ActionRequest, Coordinates, Game, TurnLog, TurnResult};
pub use position::{Neighbors8, Position};
pub use prediction::{PredictionBoard, ScoreGrid};
pub use vessel::Vessel;
