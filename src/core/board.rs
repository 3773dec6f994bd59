//! Board state: both fleets of one game and the resolution of attacks and moves.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::common::{AttackReport, Direction, ErrorCode, MoveReport, PlacementError, VesselId};
use crate::core::config::{
    vessel_id_for, ATTACK_DAMAGE, BOARD_SIZE, FLEET_SIZE, MAX_MOVE_DISTANCE, MIN_MOVE_DISTANCE,
    PLACEMENT_ATTEMPTS,
};
use crate::core::position::Position;
use crate::core::vessel::Vessel;

/// All vessels of one game, keyed (and therefore ordered) by identity.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    vessels: BTreeMap<VesselId, Vessel>,
}

impl Board {
    /// Create an empty board (no vessels placed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a single vessel for `owner` at `position`.
    pub fn place(
        &mut self,
        owner: &str,
        id: impl Into<VesselId>,
        position: Position,
    ) -> Result<(), PlacementError> {
        let id = id.into();
        if self.vessels.contains_key(&id) {
            return Err(PlacementError::DuplicateId(id));
        }
        if self.vessel_at(position).is_some() {
            return Err(PlacementError::Occupied);
        }
        self.vessels
            .insert(id.clone(), Vessel::new(id, owner, position));
        Ok(())
    }

    /// Insert a vessel as-is, e.g. with reduced strength when rebuilding a scenario.
    pub fn insert(&mut self, vessel: Vessel) -> Result<(), PlacementError> {
        if self.vessels.contains_key(vessel.id()) {
            return Err(PlacementError::DuplicateId(vessel.id().to_string()));
        }
        if self.vessel_at(vessel.position()).is_some() {
            return Err(PlacementError::Occupied);
        }
        self.vessels.insert(vessel.id().to_string(), vessel);
        Ok(())
    }

    /// Place a complete fleet for `owner` on random free cells.
    pub fn random_placement<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        owner: &str,
    ) -> Result<(), PlacementError> {
        let mut placed = self.fleet_of(owner).count();
        let mut attempts = 0;
        while placed < FLEET_SIZE {
            if attempts >= PLACEMENT_ATTEMPTS {
                return Err(PlacementError::UnableToPlace);
            }
            attempts += 1;
            let x = rng.random_range(1..=BOARD_SIZE);
            let y = rng.random_range(1..=BOARD_SIZE);
            let position = Position::new(x, y).map_err(|_| PlacementError::OutOfBoard)?;
            match self.place(owner, vessel_id_for(owner, placed + 1), position) {
                Ok(()) => placed += 1,
                Err(PlacementError::Occupied) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Vessel occupying `position`, sunk or not.
    pub fn vessel_at(&self, position: Position) -> Option<&Vessel> {
        self.vessels.values().find(|v| v.position() == position)
    }

    pub fn vessel(&self, id: &str) -> Option<&Vessel> {
        self.vessels.get(id)
    }

    /// All vessels in identity order.
    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.values()
    }

    /// Every vessel owned by `player`, sunk or not, in identity order.
    pub fn fleet_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Vessel> + 'a {
        self.vessels.values().filter(move |v| v.is_owned_by(player))
    }

    /// Living vessels owned by `player` in identity order.
    pub fn living_vessels_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Vessel> + 'a {
        self.fleet_of(player).filter(|v| !v.is_sunk())
    }

    /// Sum of strength over every vessel owned by `player`.
    pub fn remaining_strength(&self, player: &str) -> u32 {
        self.fleet_of(player).map(Vessel::strength).sum()
    }

    /// `true` if `player` has a living vessel in the 8-neighbourhood of `target`.
    pub fn in_range(&self, player: &str, target: Position) -> bool {
        self.living_vessels_of(player)
            .any(|v| v.position().is_adjacent(&target))
    }

    /// Resolve an attack by `attacker` on cell `(x, y)`.
    pub fn attack(&mut self, attacker: &str, x: i32, y: i32) -> Result<AttackReport, ErrorCode> {
        let target = Position::new(x, y)?;

        if let Some(vessel) = self.vessels.values_mut().find(|v| v.position() == target) {
            if vessel.is_owned_by(attacker) {
                return Err(ErrorCode::InvalidTarget);
            }
            if vessel.is_sunk() {
                return Ok(AttackReport::Miss);
            }
            vessel.apply_damage(ATTACK_DAMAGE);
            return Ok(if vessel.is_sunk() {
                AttackReport::HitAndSunk
            } else {
                AttackReport::Hit
            });
        }

        // empty water needs a friendly vessel alongside
        if !self.in_range(attacker, target) {
            return Err(ErrorCode::InvalidTarget);
        }
        let enemy_nearby = target.neighbors8().any(|cell| {
            self.vessel_at(cell)
                .is_some_and(|v| !v.is_owned_by(attacker) && !v.is_sunk())
        });
        Ok(if enemy_nearby {
            AttackReport::WaveHigh
        } else {
            AttackReport::Miss
        })
    }

    /// Resolve a move for `player`. The first living vessel, by identity, that
    /// can legally travel `distance` cells towards `direction` is relocated.
    pub fn move_fleet(
        &mut self,
        player: &str,
        direction: Direction,
        distance: i32,
    ) -> Result<MoveReport, ErrorCode> {
        if distance < MIN_MOVE_DISTANCE as i32 || distance > MAX_MOVE_DISTANCE as i32 {
            return Err(ErrorCode::InvalidMoveDistance);
        }

        let chosen = self
            .living_vessels_of(player)
            .find_map(|v| self.move_destination(v, direction, distance).map(|d| (v.id().to_string(), d)));

        match chosen {
            Some((id, destination)) => {
                if let Some(vessel) = self.vessels.get_mut(&id) {
                    vessel.relocate(destination);
                }
                Ok(MoveReport::MoveSuccess)
            }
            None => Ok(MoveReport::MoveBlocked),
        }
    }

    /// Destination of `vessel` if the move is legal.
    fn move_destination(&self, vessel: &Vessel, direction: Direction, distance: i32) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let origin = vessel.position();
        let mut destination = origin;
        for step in 1..=distance {
            let cell = origin.offset(dx, dy, step)?;
            // sunk hulks block passage
            if self.vessel_at(cell).is_some_and(Vessel::is_sunk) {
                return None;
            }
            destination = cell;
        }
        match self.vessel_at(destination) {
            Some(other) if other.id() != vessel.id() => None,
            _ => Some(destination),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.vessels.values()).finish()
    }
}
