/// Width and height of the square grid. Coordinates run from 1 to `BOARD_SIZE`.
pub const BOARD_SIZE: i32 = 5;
/// Vessels placed for each player at game start.
pub const FLEET_SIZE: usize = 4;
/// Strength every vessel starts with.
pub const INITIAL_STRENGTH: u32 = 3;

pub const MIN_MOVE_DISTANCE: u32 = 1;
pub const MAX_MOVE_DISTANCE: u32 = 2;

/// Random draws allowed when placing a single fleet before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Upper bound on consecutive automated plies in one request.
pub const AUTOMATED_PLY_LIMIT: usize = 500;

/// Damage dealt by a single attack.
pub const ATTACK_DAMAGE: u32 = 1;

/// Prediction score added for a hit (or hit-and-sunk) at a cell.
pub const PREDICTION_HIT_SCORE: i32 = 3;
/// Prediction score added for a wave-high signal at a cell.
pub const PREDICTION_WAVE_SCORE: i32 = 1;
/// Prediction score removed for a miss or rejected attack at a cell.
pub const PREDICTION_MISS_PENALTY: i32 = 1;

/// Identity of the `n`-th vessel (1-based) of `owner`.
pub fn vessel_id_for(owner: &str, n: usize) -> String {
    format!("{}-sub-{}", owner, n)
}

/// Returns `true` when `player_id` designates an automated seat.
///
/// Matching is case-insensitive: `cpu`, anything starting with `cpu:`, or
/// anything starting with `bot`.
pub fn is_automated(player_id: &str) -> bool {
    let id = player_id.to_ascii_lowercase();
    id == "cpu" || id.starts_with("cpu:") || id.starts_with("bot")
}
