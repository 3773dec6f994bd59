use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;

use subfleet::{
    init_logging, run_local, ui, CliPlayer, GameService, GameStatus, Player, Skeleton, Stub,
    TcpTransport,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve games over TCP until interrupted.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8081")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play against the automated opponent in this terminal.
    Local {
        #[arg(long, default_value = "player")]
        player: String,
        #[arg(long, default_value = "cpu")]
        opponent: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play on a remote server, starting a new game or joining one by id.
    Connect {
        #[arg(long, default_value = "127.0.0.1:8081")]
        connect: String,
        #[arg(long, default_value = "player")]
        player: String,
        #[arg(long, default_value = "cpu")]
        opponent: String,
        #[arg(long, help = "Join an existing game instead of creating one")]
        game: Option<String>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, seed } => {
            let service = Arc::new(GameService::in_memory(make_rng(seed)));
            let listener = TcpListener::bind(&bind).await?;
            info!("listening on {}", bind);
            loop {
                let (stream, addr) = listener.accept().await?;
                info!("client connected from {}", addr);
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let mut skeleton = Skeleton::new(service, TcpTransport::new(stream));
                    if let Err(e) = skeleton.run().await {
                        warn!("connection {} closed: {}", addr, e);
                    }
                });
            }
        }
        Commands::Local {
            player,
            opponent,
            seed,
        } => {
            let service = GameService::in_memory(make_rng(seed));
            let game = service.initialize_game(&player, &opponent)?;
            println!("Game {} started: {} vs {}. Type `h` for help.", game.game_id, player, opponent);
            let mut human = CliPlayer::stdin();
            let mut stdout = std::io::stdout();
            // stdin is blocking; keep it off the async workers
            let status = tokio::task::block_in_place(|| {
                run_local(&service, &game.game_id, &player, &mut human, &mut stdout)
            })?;
            info!("local game ended with status {:?}", status);
        }
        Commands::Connect {
            connect,
            player,
            opponent,
            game,
        } => {
            let mut stub = Stub::new(TcpTransport::connect(connect.as_str()).await?);
            let game_id = match game {
                Some(id) => id,
                None => stub.initialize(&player, &opponent).await?.game_id,
            };
            println!("Playing {} as {}. Type `h` for help.", game_id, player);
            play_remote(&mut stub, &game_id, &player).await?;
        }
    }
    Ok(())
}

async fn play_remote(
    stub: &mut Stub<TcpTransport>,
    game_id: &str,
    player: &str,
) -> anyhow::Result<()> {
    let mut human = CliPlayer::stdin();
    let mut waiting = false;
    loop {
        let state = stub.state(game_id, player).await?;
        let my_turn = state.current_player_id.as_deref() == Some(player);
        if state.status != GameStatus::Finished && !my_turn {
            if !waiting {
                println!("Waiting for {}...", state.opponent_id);
                waiting = true;
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
            continue;
        }
        waiting = false;

        println!("\n{}", ui::render_board(&state));
        println!("{}", ui::render_prediction(&state.prediction_board));
        if state.status == GameStatus::Finished {
            match state.winner_id.as_deref() {
                Some(w) if w == player => println!("You win!"),
                Some(w) => println!("{} wins.", w),
                None => println!("Game over."),
            }
            return Ok(());
        }

        let Some(request) = tokio::task::block_in_place(|| human.select_action(&state))? else {
            return Ok(());
        };
        let response = stub.act(request).await?;
        println!("{}", ui::describe_response(&response));
    }
}
