//! Vessel definitions: identity, owner, position and remaining strength.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::common::{PlayerId, VesselId};
use crate::core::config::INITIAL_STRENGTH;
use crate::core::position::Position;

/// A single combat unit on the board.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vessel {
    id: VesselId,
    owner: PlayerId,
    position: Position,
    strength: u32,
}

impl Vessel {
    /// Create a vessel at full strength.
    pub fn new(id: impl Into<VesselId>, owner: impl Into<PlayerId>, position: Position) -> Self {
        Self::with_strength(id, owner, position, INITIAL_STRENGTH)
    }

    pub fn with_strength(
        id: impl Into<VesselId>,
        owner: impl Into<PlayerId>,
        position: Position,
        strength: u32,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            position,
            strength,
        }
    }

    /// Reduce strength by `amount`, stopping at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.strength = self.strength.saturating_sub(amount);
    }

    pub fn is_sunk(&self) -> bool {
        self.strength == 0
    }

    /// Move to `position`. The board checks legality before calling this.
    pub fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn is_owned_by(&self, player: &str) -> bool {
        self.owner == player
    }
}

impl fmt::Debug for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vessel {{ id: \"{}\", owner: \"{}\", position: {}, strength: {} }}",
            self.id, self.owner, self.position, self.strength,
        )
    }
}
