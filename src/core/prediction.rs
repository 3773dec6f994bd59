//! Per-viewer estimate of enemy occupancy built from that viewer's attack history.

use serde::{Deserialize, Serialize};

use crate::core::common::AttackReport;
use crate::core::config::{
    BOARD_SIZE, PREDICTION_HIT_SCORE, PREDICTION_MISS_PENALTY, PREDICTION_WAVE_SCORE,
};
use crate::core::position::Position;

const GRID_SIZE: usize = BOARD_SIZE as usize;

pub type ScoreGrid = [[i32; GRID_SIZE]; GRID_SIZE];

/// Score grid indexed `[y - 1][x - 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBoard {
    pub score_grid: ScoreGrid,
    pub possible_enemy_count: ScoreGrid,
    /// Unix milliseconds of the last update.
    pub updated_at: u64,
}

impl PredictionBoard {
    pub fn new(now: u64) -> Self {
        Self {
            score_grid: [[0; GRID_SIZE]; GRID_SIZE],
            possible_enemy_count: [[0; GRID_SIZE]; GRID_SIZE],
            updated_at: now,
        }
    }

    /// Fold one attack outcome at `target` into the grid. `None` stands for a
    /// rejected attack and is scored like a miss.
    pub fn record(&mut self, target: Position, outcome: Option<AttackReport>, now: u64) {
        let (row, col) = ((target.y() - 1) as usize, (target.x() - 1) as usize);
        let cell = &mut self.score_grid[row][col];
        *cell = match outcome {
            Some(AttackReport::Hit) | Some(AttackReport::HitAndSunk) => *cell + PREDICTION_HIT_SCORE,
            Some(AttackReport::WaveHigh) => *cell + PREDICTION_WAVE_SCORE,
            Some(AttackReport::Miss) | None => (*cell - PREDICTION_MISS_PENALTY).max(0),
        };
        // mirrors the score grid until a real normalisation exists
        self.possible_enemy_count[row][col] = *cell;
        self.updated_at = now;
    }

    pub fn score_at(&self, position: Position) -> i32 {
        self.score_grid[(position.y() - 1) as usize][(position.x() - 1) as usize]
    }

    /// Cell with the highest score, ties broken by (x, y) order. `None` while
    /// every score is zero.
    pub fn hottest(&self) -> Option<Position> {
        Position::all()
            .filter(|p| self.score_at(*p) > 0)
            .fold(None, |best: Option<Position>, p| match best {
                Some(b) if self.score_at(b) >= self.score_at(p) => Some(b),
                _ => Some(p),
            })
    }
}
