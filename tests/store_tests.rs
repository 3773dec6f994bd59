use std::sync::Arc;
use std::thread;

use subfleet::{
    ActionCommand, ActionRequest, AttackReport, Board, Direction, Game, GameStore,
    InMemoryGameStore, InMemoryPlayerGamesIndex, InMemoryPredictionStore, InMemoryTurnLogStore,
    PlayerGamesIndex, Position, PredictionBoard, PredictionStore, TurnLog, TurnLogStore,
};

fn game(id: &str) -> Game {
    let mut board = Board::new();
    board.place("a", "a-sub-1", Position::new(2, 2).unwrap()).unwrap();
    board.place("b", "b-sub-1", Position::new(3, 3).unwrap()).unwrap();
    Game::with_board(id, "a", "b", board, 0)
}

fn log_entry(turn: u32, player: &str) -> TurnLog {
    let mut g = game("g-1");
    let command = ActionCommand::movement(player, Direction::West, 1);
    let request = ActionRequest::from_command("g-1", &command);
    let result = g.apply_request(&request, turn as u64);
    TurnLog::new(turn, &request, &result, turn as u64)
}

#[test]
fn game_store_hands_out_independent_copies() -> anyhow::Result<()> {
    let store = InMemoryGameStore::new();
    let original = game("g-1");
    store.save(&original)?;

    let mut copy = store.find_by_id("g-1")?.unwrap();
    let result = copy.apply(&ActionCommand::attack("a", 3, 3), 1);
    assert_eq!(result.attack_report, Some(AttackReport::Hit));

    assert_eq!(store.find_by_id("g-1")?, Some(original));
    store.save(&copy)?;
    assert_eq!(store.find_by_id("g-1")?, Some(copy));
    assert_eq!(store.find_by_id("missing")?, None);
    Ok(())
}

#[test]
fn turn_logs_keep_insertion_order() -> anyhow::Result<()> {
    let store = InMemoryTurnLogStore::new();
    assert!(store.find_by_game_id("g-1")?.is_empty());

    store.append("g-1", log_entry(1, "a"))?;
    store.append("g-1", log_entry(1, "b"))?;
    store.append("g-2", log_entry(7, "a"))?;
    store.append("g-1", log_entry(2, "b"))?;

    let logs = store.find_by_game_id("g-1")?;
    let order: Vec<(u32, &str)> = logs.iter().map(|l| (l.turn, l.player_id.as_str())).collect();
    assert_eq!(order, vec![(1, "a"), (1, "b"), (2, "b")]);
    assert_eq!(store.find_by_game_id("g-2")?.len(), 1);
    Ok(())
}

#[test]
fn predictions_are_kept_per_viewer() -> anyhow::Result<()> {
    let store = InMemoryPredictionStore::new();
    assert_eq!(store.find("g-1", "a")?, None);

    let mut board = PredictionBoard::new(1);
    board.record(Position::new(1, 1).unwrap(), Some(AttackReport::Hit), 2);
    store.save("g-1", "a", &board)?;

    assert_eq!(store.find("g-1", "a")?, Some(board.clone()));
    assert_eq!(store.find("g-1", "b")?, None);
    assert_eq!(store.find("g-2", "a")?, None);

    board.record(Position::new(1, 1).unwrap(), Some(AttackReport::Hit), 3);
    store.save("g-1", "a", &board)?;
    assert_eq!(store.find("g-1", "a")?.unwrap().score_grid[0][0], 6);
    Ok(())
}

#[test]
fn player_index_lists_sorted_unique_games() -> anyhow::Result<()> {
    let index = InMemoryPlayerGamesIndex::new();
    index.add_game("a", "game-2")?;
    index.add_game("a", "game-1")?;
    index.add_game("a", "game-2")?;
    index.add_game("b", "game-2")?;

    assert_eq!(index.list_games("a")?, vec!["game-1", "game-2"]);
    assert_eq!(index.list_games("b")?, vec!["game-2"]);
    assert!(index.list_games("nobody")?.is_empty());
    Ok(())
}

#[test]
fn concurrent_writers_on_different_games() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryTurnLogStore::new());
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = Arc::clone(&store);
            thread::spawn(move || -> anyhow::Result<()> {
                let game_id = format!("g-{}", n);
                for turn in 0..50 {
                    store.append(&game_id, log_entry(turn, "a"))?;
                }
                Ok(())
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap()?;
    }
    for n in 0..8 {
        let logs = store.find_by_game_id(&format!("g-{}", n))?;
        assert_eq!(logs.len(), 50);
        assert!(logs.windows(2).all(|w| w[0].turn < w[1].turn));
    }
    Ok(())
}
