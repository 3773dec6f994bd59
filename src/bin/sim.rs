use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

use subfleet::{init_logging, FixedClock, GameService, GameStatus, Stores};

/// Rounds of automated play before the simulation is called a draw.
const MAX_ROUNDS: usize = 20;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let service = GameService::new(
        Stores::in_memory(),
        Arc::new(FixedClock::new(0)),
        SmallRng::seed_from_u64(seed),
    );
    let game = service.initialize_game("bot-a", "cpu")?;

    let mut status = game.status;
    let mut rounds = 0;
    while status != GameStatus::Finished && rounds < MAX_ROUNDS {
        status = service.resume_automated(&game.game_id)?;
        rounds += 1;
    }

    let state = service.game_state(&game.game_id, "bot-a")?;
    let result = json!({
        "seed": seed,
        "gameId": state.game_id,
        "status": state.status,
        "turns": state.turn,
        "winner": state.winner_id,
        "logEntries": state.logs.len(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
