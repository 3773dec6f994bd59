//! Two-player grid combat on a 5x5 board, with an optional automated seat.
//!
//! `core` holds the rules engine; `service` wires it to the stores in `store`;
//! `protocol`, `transport`, `skeleton` and `stub` carry it over a connection.

pub mod core;
mod logging;
pub mod player;
pub mod protocol;
pub mod service;
pub mod skeleton;
pub mod store;
pub mod stub;
pub mod transport;
pub mod ui;

pub use crate::core::*;
pub use logging::{init_logging, LOG_ENV};
pub use player::{run_local, CliPlayer, Player, ScriptedPlayer};
pub use protocol::{Message, PROTOCOL_VERSION};
pub use service::{
    ActionResponse, GameService, GameStateView, InitializeResponse, ServiceError, Stores,
    VesselView,
};
pub use skeleton::Skeleton;
pub use store::{
    GameStore, InMemoryGameStore, InMemoryPlayerGamesIndex, InMemoryPredictionStore,
    InMemoryTurnLogStore, PlayerGamesIndex, PredictionStore, TurnLogStore,
};
pub use stub::Stub;
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
