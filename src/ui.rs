//! Text rendering of a viewer's situation.

use std::fmt::Write;

use crate::core::{Position, PredictionBoard, BOARD_SIZE};
use crate::service::{ActionResponse, GameStateView};

/// Grid as seen by `state.viewer_id`: own vessels show their strength, sunk
/// hulks of either side show as `x`, living enemies stay hidden.
pub fn render_board(state: &GameStateView) -> String {
    let mut out = String::new();
    let _ = write!(out, "    ");
    for x in 1..=BOARD_SIZE {
        let _ = write!(out, " {}", x);
    }
    let _ = writeln!(out);
    for y in 1..=BOARD_SIZE {
        let _ = write!(out, "  {} ", y);
        for x in 1..=BOARD_SIZE {
            let ch = Position::new(x, y)
                .ok()
                .and_then(|p| state.vessel_at(p))
                .map(|v| {
                    if v.sunk {
                        'x'
                    } else if v.owner_id == state.viewer_id {
                        char::from_digit(v.strength, 10).unwrap_or('#')
                    } else {
                        '.'
                    }
                })
                .unwrap_or('.');
            let _ = write!(out, " {}", ch);
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "    Legend: 1-3=your vessel (strength)  x=sunk  .=water");
    out
}

/// Prediction scores, `-` for cells never scored.
pub fn render_prediction(board: &PredictionBoard) -> String {
    let mut out = String::from("Enemy estimate:\n");
    for row in board.score_grid.iter() {
        let _ = write!(out, "   ");
        for &score in row.iter() {
            if score == 0 {
                let _ = write!(out, "  -");
            } else {
                let _ = write!(out, " {:>2}", score);
            }
        }
        let _ = writeln!(out);
    }
    if let Some(p) = board.hottest() {
        let _ = writeln!(out, "   most likely enemy position: {}", p);
    }
    out
}

/// One-line summary of an action response.
pub fn describe_response(resp: &ActionResponse) -> String {
    let mut line = match (&resp.error_code, &resp.attack_report, &resp.move_report) {
        (Some(code), _, _) => format!("Rejected: {}", code),
        (None, Some(report), _) => format!("Attack: {:?}", report),
        (None, None, Some(report)) => format!("Move: {:?}", report),
        (None, None, None) => String::from("No result"),
    };
    match (&resp.winner_id, &resp.next_player_id) {
        (Some(winner), _) => {
            let _ = write!(line, " - game over, {} wins", winner);
        }
        (None, Some(next)) => {
            let _ = write!(line, " - turn {}, {} to act", resp.turn, next);
        }
        (None, None) => {}
    }
    line
}
