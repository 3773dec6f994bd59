use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use subfleet::{
    ActionCommand, ActionRequest, Direction, GameService, GameStatus, InMemoryTransport, Message,
    Skeleton, Stub, TcpTransport, Transport, PROTOCOL_VERSION,
};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

fn shared_service(seed: u64) -> Arc<GameService> {
    Arc::new(GameService::in_memory(SmallRng::seed_from_u64(seed)))
}

#[tokio::test(flavor = "multi_thread")]
async fn stub_and_skeleton_in_memory() -> anyhow::Result<()> {
    let (server_transport, client_transport) = InMemoryTransport::pair();
    let service = shared_service(1);
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(service, server_transport);
        skeleton.run().await
    });

    let mut stub = Stub::new(client_transport);
    let created = stub.initialize("alice", "cpu").await?;
    assert_eq!(created.status, GameStatus::InProgress);
    assert_eq!(created.current_player_id.as_deref(), Some("alice"));

    let command = ActionCommand::movement("alice", Direction::East, 1);
    let response = stub
        .act(ActionRequest::from_command(created.game_id.clone(), &command))
        .await?;
    assert!(response.move_report.is_some());
    assert_eq!(response.next_player_id.as_deref(), Some("alice"));

    let state = stub.state(&created.game_id, "alice").await?;
    assert_eq!(state.logs.len(), 2);
    assert_eq!(stub.list_games("alice").await?, vec![created.game_id.clone()]);

    drop(stub);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn service_errors_come_back_as_errors() -> anyhow::Result<()> {
    let (server_transport, client_transport) = InMemoryTransport::pair();
    let service = shared_service(2);
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(service, server_transport);
        skeleton.run().await
    });

    let mut stub = Stub::new(client_transport);
    let err = stub.state("game-404", "alice").await.unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(stub.initialize("alice", "alice").await.is_err());

    // the connection survives failed requests
    assert!(stub.initialize("alice", "bob").await.is_ok());

    drop(stub);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn version_mismatch_is_refused() -> anyhow::Result<()> {
    let (server_transport, mut client) = InMemoryTransport::pair();
    let service = shared_service(3);
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(service, server_transport);
        skeleton.run().await
    });

    client
        .send(Message::Hello {
            version: PROTOCOL_VERSION + 1,
        })
        .await?;
    match client.recv().await? {
        Message::Error { message } => assert!(message.contains("version mismatch")),
        other => panic!("expected an error, got {:?}", other),
    }
    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_before_handshake_are_refused() -> anyhow::Result<()> {
    let (server_transport, mut client) = InMemoryTransport::pair();
    let service = shared_service(4);
    let server = tokio::spawn(async move {
        let mut skeleton = Skeleton::new(service, server_transport);
        skeleton.run().await
    });

    client
        .send(Message::ListGamesReq {
            player_id: "alice".to_string(),
        })
        .await?;
    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stub_and_skeleton_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let service = shared_service(5);
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let mut skeleton = Skeleton::new(service, TcpTransport::new(stream));
        skeleton.run().await
    });

    let mut stub = Stub::new(TcpTransport::connect(addr).await?);
    let created = stub.initialize("alice", "bob").await?;
    let command = ActionCommand::movement("alice", Direction::North, 2);
    let response = stub
        .act(ActionRequest::from_command(created.game_id.clone(), &command))
        .await?;
    assert_eq!(response.turn, 2);
    assert_eq!(response.next_player_id.as_deref(), Some("bob"));

    let state = stub.state(&created.game_id, "bob").await?;
    assert_eq!(state.viewer_id, "bob");
    assert_eq!(state.logs.len(), 1);

    drop(stub);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let mut transport = TcpTransport::with_config(stream, Duration::from_secs(5), 1024);
        transport.recv().await
    });

    let mut raw = TcpStream::connect(addr).await?;
    raw.write_all(&4096u32.to_be_bytes()).await?;
    raw.flush().await?;

    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("too large"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn silent_peer_times_out() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let mut transport = TcpTransport::with_config(stream, Duration::from_secs(5), 1024)
            .with_idle_timeout(Duration::from_millis(100));
        transport.recv().await
    });

    let _raw = TcpStream::connect(addr).await?;
    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("Idle timeout"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stalled_frame_body_times_out() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let mut transport = TcpTransport::with_config(stream, Duration::from_millis(100), 1024);
        transport.recv().await
    });

    let mut raw = TcpStream::connect(addr).await?;
    raw.write_all(&64u32.to_be_bytes()).await?;
    raw.write_all(&[0u8; 8]).await?;
    raw.flush().await?;

    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("Receive timeout"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_player_keeps_the_connection() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let service = shared_service(6);
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await?;
        let transport = TcpTransport::with_config(stream, Duration::from_millis(100), 1_000_000);
        let mut skeleton = Skeleton::new(service, transport);
        skeleton.run().await
    });

    let mut stub = Stub::new(TcpTransport::connect(addr).await?);
    let created = stub.initialize("alice", "cpu").await?;

    // thinking at the prompt for longer than the I/O timeout
    tokio::time::sleep(Duration::from_millis(400)).await;

    let command = ActionCommand::movement("alice", Direction::West, 1);
    let response = stub
        .act(ActionRequest::from_command(created.game_id.clone(), &command))
        .await?;
    assert_eq!(response.game_id, created.game_id);

    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = stub.state(&created.game_id, "alice").await?;
    assert!(!state.logs.is_empty());

    drop(stub);
    server.await??;
    Ok(())
}
