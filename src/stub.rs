use anyhow::anyhow;

use crate::core::{ActionRequest, GameId};
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::service::{ActionResponse, GameStateView, InitializeResponse};
use crate::transport::Transport;

/// Client side of a connection to a game server.
pub struct Stub<T: Transport> {
    transport: T,
    handshaken: bool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::Hello { .. } => {
                self.handshaken = true;
                Ok(())
            }
            Message::Error { message } => Err(anyhow!(message)),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    async fn call(&mut self, msg: Message) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        self.transport.send(msg).await?;
        match self.transport.recv().await? {
            Message::Error { message } => Err(anyhow!(message)),
            reply => Ok(reply),
        }
    }

    pub async fn initialize(&mut self, player_a: &str, player_b: &str) -> anyhow::Result<InitializeResponse> {
        let msg = Message::InitializeReq {
            player_a: player_a.to_string(),
            player_b: player_b.to_string(),
        };
        match self.call(msg).await? {
            Message::InitializeResp(resp) => Ok(resp),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    pub async fn act(&mut self, request: ActionRequest) -> anyhow::Result<ActionResponse> {
        match self.call(Message::ActionReq(request)).await? {
            Message::ActionResp(resp) => Ok(resp),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    pub async fn state(&mut self, game_id: &str, viewer_id: &str) -> anyhow::Result<GameStateView> {
        let msg = Message::StateReq {
            game_id: game_id.to_string(),
            viewer_id: viewer_id.to_string(),
        };
        match self.call(msg).await? {
            Message::StateResp(state) => Ok(*state),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    pub async fn list_games(&mut self, player_id: &str) -> anyhow::Result<Vec<GameId>> {
        let msg = Message::ListGamesReq {
            player_id: player_id.to_string(),
        };
        match self.call(msg).await? {
            Message::ListGamesResp { game_ids } => Ok(game_ids),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }
}
