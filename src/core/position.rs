//! Grid coordinates and neighbourhood queries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::common::ErrorCode;
use crate::core::config::BOARD_SIZE;

/// A cell on the grid. Both coordinates are within `1..=BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    x: i32,
    y: i32,
}

#[derive(Serialize, Deserialize)]
struct RawPosition {
    x: i32,
    y: i32,
}

impl Position {
    /// Build a position, failing with `OutOfBoard` outside the grid.
    pub fn new(x: i32, y: i32) -> Result<Self, ErrorCode> {
        if Self::within_board(x, y) {
            Ok(Self { x, y })
        } else {
            Err(ErrorCode::OutOfBoard)
        }
    }

    pub fn within_board(x: i32, y: i32) -> bool {
        (1..=BOARD_SIZE).contains(&x) && (1..=BOARD_SIZE).contains(&y)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Position `steps` cells away in direction `(dx, dy)`, if still on the grid.
    pub fn offset(&self, dx: i32, dy: i32, steps: i32) -> Option<Self> {
        Self::new(self.x + dx * steps, self.y + dy * steps).ok()
    }

    /// In-grid cells surrounding this one, excluding itself, in (x, y) order.
    pub fn neighbors8(&self) -> Neighbors8 {
        Neighbors8 {
            center: *self,
            index: 0,
        }
    }

    /// `true` when `other` is one of the (up to) eight surrounding cells.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    /// Every cell on the grid in (x, y) order.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=BOARD_SIZE).flat_map(|x| (1..=BOARD_SIZE).map(move |y| Position { x, y }))
    }
}

impl TryFrom<RawPosition> for Position {
    type Error = ErrorCode;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.x, raw.y)
    }
}

impl From<Position> for RawPosition {
    fn from(p: Position) -> Self {
        RawPosition { x: p.x, y: p.y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Iterator over the 8-neighbourhood of a position. Calling `neighbors8`
/// again yields a fresh iterator.
#[derive(Debug, Clone)]
pub struct Neighbors8 {
    center: Position,
    // 0..9 over the 3x3 block, dx-major.
    index: u8,
}

impl Iterator for Neighbors8 {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.index < 9 {
            let i = self.index as i32;
            self.index += 1;
            let dx = i / 3 - 1;
            let dy = i % 3 - 1;
            if dx == 0 && dy == 0 {
                continue;
            }
            if let Some(p) = self.center.offset(dx, dy, 1) {
                return Some(p);
            }
        }
        None
    }
}
