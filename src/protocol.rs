use serde::{Deserialize, Serialize};

use crate::core::{ActionRequest, GameId, PlayerId};
use crate::service::{ActionResponse, GameStateView, InitializeResponse};

/// Bumped whenever `Message` changes shape.
pub const PROTOCOL_VERSION: u8 = 1;

/// Messages exchanged between a client and the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Opening handshake, echoed back by the server.
    Hello { version: u8 },
    /// Create a game between two players.
    InitializeReq { player_a: PlayerId, player_b: PlayerId },
    InitializeResp(InitializeResponse),
    /// Submit an attack or move.
    ActionReq(ActionRequest),
    ActionResp(ActionResponse),
    /// Fetch a game as seen by `viewer_id`.
    StateReq { game_id: GameId, viewer_id: PlayerId },
    StateResp(Box<GameStateView>),
    ListGamesReq { player_id: PlayerId },
    ListGamesResp { game_ids: Vec<GameId> },
    /// Request failed for a reason other than a rule rejection.
    Error { message: String },
}
