use rand::rngs::SmallRng;
use rand::SeedableRng;
use subfleet::ui::{describe_response, render_board, render_prediction};
use subfleet::{
    ActionCommand, ActionRequest, AttackReport, Board, Direction, Game, GameService, GameStore,
    Position, PredictionBoard, Vessel,
};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y).unwrap()
}

fn service_with_duel() -> GameService {
    let service = GameService::in_memory(SmallRng::seed_from_u64(0));
    let mut board = Board::new();
    board.insert(Vessel::with_strength("alice-sub-1", "alice", pos(2, 2), 2)).unwrap();
    board.insert(Vessel::new("bob-sub-1", "bob", pos(3, 3))).unwrap();
    board.insert(Vessel::with_strength("bob-sub-2", "bob", pos(5, 5), 0)).unwrap();
    let game = Game::with_board("duel", "alice", "bob", board, 0);
    service.stores().games.save(&game).unwrap();
    service
}

#[test]
fn board_hides_living_enemies() {
    let service = service_with_duel();
    let text = render_board(&service.game_state("duel", "alice").unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "     1 2 3 4 5");
    assert_eq!(lines[2], "  2  . 2 . . .");
    assert_eq!(lines[3], "  3  . . . . .");
    assert_eq!(lines[5], "  5  . . . . x");
}

#[test]
fn each_viewer_sees_their_own_fleet() {
    let service = service_with_duel();
    let text = render_board(&service.game_state("duel", "bob").unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[2], "  2  . . . . .");
    assert_eq!(lines[3], "  3  . . 3 . .");
}

#[test]
fn prediction_grid_marks_scored_cells() {
    let mut board = PredictionBoard::new(0);
    board.record(pos(4, 1), Some(AttackReport::Hit), 1);
    let text = render_prediction(&board);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Enemy estimate:");
    assert_eq!(lines[1], "     -  -  -  3  -");
    assert!(text.contains("most likely enemy position: (4, 1)"));
    assert!(!render_prediction(&PredictionBoard::new(0)).contains("most likely"));
}

#[test]
fn responses_read_naturally() {
    let service = service_with_duel();
    let hit = ActionCommand::attack("alice", 3, 3);
    let response = service
        .execute_action(&ActionRequest::from_command("duel", &hit))
        .unwrap();
    assert_eq!(describe_response(&response), "Attack: Hit - turn 2, bob to act");

    let early = ActionCommand::movement("alice", Direction::West, 1);
    let rejected = service
        .execute_action(&ActionRequest::from_command("duel", &early))
        .unwrap();
    assert_eq!(describe_response(&rejected), "Rejected: not your turn - turn 2, bob to act");
}
