use subfleet::{AttackReport, Position, PredictionBoard};

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y).unwrap()
}

#[test]
fn starts_empty() {
    let board = PredictionBoard::new(7);
    assert!(board.score_grid.iter().flatten().all(|&s| s == 0));
    assert_eq!(board.updated_at, 7);
    assert_eq!(board.hottest(), None);
}

#[test]
fn scores_follow_outcomes() {
    let mut board = PredictionBoard::new(0);
    board.record(pos(2, 4), Some(AttackReport::Hit), 1);
    assert_eq!(board.score_at(pos(2, 4)), 3);
    assert_eq!(board.score_grid[3][1], 3);

    board.record(pos(2, 4), Some(AttackReport::HitAndSunk), 2);
    assert_eq!(board.score_at(pos(2, 4)), 6);

    board.record(pos(2, 4), Some(AttackReport::Miss), 3);
    assert_eq!(board.score_at(pos(2, 4)), 5);

    board.record(pos(5, 1), Some(AttackReport::WaveHigh), 4);
    assert_eq!(board.score_grid[0][4], 1);
    assert_eq!(board.updated_at, 4);
}

#[test]
fn misses_and_rejections_floor_at_zero() {
    let mut board = PredictionBoard::new(0);
    board.record(pos(1, 1), Some(AttackReport::Miss), 1);
    board.record(pos(1, 1), None, 2);
    assert_eq!(board.score_at(pos(1, 1)), 0);
    assert_eq!(board.updated_at, 2);

    board.record(pos(1, 1), Some(AttackReport::WaveHigh), 3);
    board.record(pos(1, 1), None, 4);
    assert_eq!(board.score_at(pos(1, 1)), 0);
}

#[test]
fn enemy_count_mirrors_scores() {
    let mut board = PredictionBoard::new(0);
    board.record(pos(3, 2), Some(AttackReport::Hit), 1);
    board.record(pos(4, 4), Some(AttackReport::WaveHigh), 2);
    board.record(pos(4, 4), Some(AttackReport::WaveHigh), 3);
    assert_eq!(board.possible_enemy_count, board.score_grid);
}

#[test]
fn hottest_prefers_highest_then_first_cell() {
    let mut board = PredictionBoard::new(0);
    board.record(pos(4, 1), Some(AttackReport::WaveHigh), 1);
    board.record(pos(2, 5), Some(AttackReport::WaveHigh), 1);
    assert_eq!(board.hottest(), Some(pos(2, 5)));

    board.record(pos(5, 5), Some(AttackReport::Hit), 2);
    assert_eq!(board.hottest(), Some(pos(5, 5)));
}

#[test]
fn serializes_in_camel_case() {
    let board = PredictionBoard::new(1);
    let json = serde_json::to_value(&board).unwrap();
    assert!(json.get("scoreGrid").is_some());
    assert!(json.get("possibleEnemyCount").is_some());
    assert_eq!(json["updatedAt"], 1);
}
