use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, warn};

use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::service::GameService;
use crate::transport::Transport;

/// Server side of one connection: answers the handshake, then serves requests
/// against the shared service until the peer goes away.
pub struct Skeleton<T: Transport> {
    service: Arc<GameService>,
    transport: T,
}

impl<T: Transport> Skeleton<T> {
    pub fn new(service: Arc<GameService>, transport: T) -> Self {
        Self { service, transport }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Hello { version } => {
                let message = format!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION, version
                );
                self.transport
                    .send(Message::Error {
                        message: message.clone(),
                    })
                    .await?;
                return Err(anyhow!(message));
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) => {
                    debug!("connection ended: {}", e);
                    break;
                }
            };
            debug!("request: {:?}", msg);
            let reply = self.handle(msg);
            self.transport.send(reply).await?;
        }
        Ok(())
    }

    fn handle(&self, msg: Message) -> Message {
        let reply = match msg {
            Message::InitializeReq { player_a, player_b } => self
                .service
                .initialize_game(&player_a, &player_b)
                .map(Message::InitializeResp),
            Message::ActionReq(request) => self
                .service
                .execute_action(&request)
                .map(Message::ActionResp),
            Message::StateReq { game_id, viewer_id } => self
                .service
                .game_state(&game_id, &viewer_id)
                .map(|state| Message::StateResp(Box::new(state))),
            Message::ListGamesReq { player_id } => self
                .service
                .list_games(&player_id)
                .map(|game_ids| Message::ListGamesResp { game_ids }),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        };
        reply.unwrap_or_else(|e| {
            warn!("request failed: {}", e);
            Message::Error {
                message: e.to_string(),
            }
        })
    }
}
