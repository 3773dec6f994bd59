use std::collections::VecDeque;

use crate::core::{ActionCommand, ActionRequest};
use crate::service::{ActionResponse, GameStateView};

use super::Player;

/// Player that submits a fixed sequence of actions, then leaves.
pub struct ScriptedPlayer {
    actions: VecDeque<ActionCommand>,
    responses: Vec<ActionResponse>,
}

impl ScriptedPlayer {
    pub fn new(actions: impl IntoIterator<Item = ActionCommand>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            responses: Vec::new(),
        }
    }

    /// Responses received so far, oldest first.
    pub fn responses(&self) -> &[ActionResponse] {
        &self.responses
    }
}

impl Player for ScriptedPlayer {
    fn select_action(&mut self, state: &GameStateView) -> anyhow::Result<Option<ActionRequest>> {
        Ok(self
            .actions
            .pop_front()
            .map(|command| ActionRequest::from_command(state.game_id.clone(), &command)))
    }

    fn handle_response(&mut self, response: &ActionResponse) {
        self.responses.push(response.clone());
    }
}
