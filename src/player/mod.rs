//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - CliPlayer: Interactive command-line player
//! - ScriptedPlayer: Replays a fixed list of actions
//!
//! `run_local` drives one human seat against the in-process service; automated
//! seats are played by the service itself.

use std::io::Write;

use crate::core::{ActionRequest, GameStatus};
use crate::service::{ActionResponse, GameService, GameStateView};
use crate::ui;

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose the next action for the game shown in `state`. `None` leaves
    /// the game.
    fn select_action(&mut self, state: &GameStateView) -> anyhow::Result<Option<ActionRequest>>;

    /// Inform the player of the outcome of its last action.
    fn handle_response(&mut self, _response: &ActionResponse) {}
}

pub mod cli;
pub use cli::CliPlayer;

pub mod scripted;
pub use scripted::ScriptedPlayer;

/// Play `human`'s seat of `game_id` until the game ends or the player quits.
pub fn run_local(
    service: &GameService,
    game_id: &str,
    human: &str,
    player: &mut dyn Player,
    out: &mut dyn Write,
) -> anyhow::Result<GameStatus> {
    loop {
        let state = service.game_state(game_id, human)?;
        writeln!(out, "\n{}", ui::render_board(&state))?;
        writeln!(out, "{}", ui::render_prediction(&state.prediction_board))?;

        if state.status == GameStatus::Finished {
            match state.winner_id.as_deref() {
                Some(w) if w == human => writeln!(out, "You win!")?,
                Some(w) => writeln!(out, "{} wins.", w)?,
                None => writeln!(out, "Game over.")?,
            }
            return Ok(state.status);
        }
        if state.current_player_id.as_deref() != Some(human) {
            writeln!(out, "Waiting for {}...", state.opponent_id)?;
            return Ok(state.status);
        }

        let Some(request) = player.select_action(&state)? else {
            return Ok(state.status);
        };
        let response = service.execute_action(&request)?;
        writeln!(out, "{}", ui::describe_response(&response))?;
        player.handle_response(&response);
    }
}
