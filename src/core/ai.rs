//! Greedy decision logic for an automated seat: attack the first adjacent
//! living enemy, otherwise drift randomly.

use rand::Rng;

use crate::core::{
    board::Board,
    common::Direction,
    config::{MAX_MOVE_DISTANCE, MIN_MOVE_DISTANCE},
    game::{ActionCommand, Game},
    position::Position,
};

/// First living enemy cell adjacent to one of `player`'s living vessels.
/// Vessels are scanned by identity, neighbours in (x, y) order.
pub fn find_adjacent_target(board: &Board, player: &str) -> Option<Position> {
    board.living_vessels_of(player).find_map(|vessel| {
        vessel.position().neighbors8().find(|cell| {
            board
                .vessel_at(*cell)
                .is_some_and(|v| !v.is_owned_by(player) && !v.is_sunk())
        })
    })
}

/// Uniformly random direction and distance.
pub fn random_move<R: Rng + ?Sized>(rng: &mut R) -> (Direction, i32) {
    let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    let distance = rng.random_range(MIN_MOVE_DISTANCE..=MAX_MOVE_DISTANCE) as i32;
    (direction, distance)
}

/// Choose the next action for the seat to act. `None` once the game is over.
pub fn decide_action<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<ActionCommand> {
    let player = game.current_player()?;
    if let Some(target) = find_adjacent_target(game.board(), player) {
        return Some(ActionCommand::attack(player, target.x(), target.y()));
    }
    let (direction, distance) = random_move(rng);
    Some(ActionCommand::movement(player, direction, distance))
}
