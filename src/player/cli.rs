use std::io::{self, BufRead, Write};

use crate::core::{ActionRequest, ActionType, Coordinates, Direction};
use crate::service::GameStateView;

use super::Player;

const HELP: &str = "Commands:
  a <x> <y>             attack cell (x, y), e.g. `a 3 2`
  m <dir> <distance>    move north/south/east/west by 1 or 2, e.g. `m e 2`
  q                     quit";

/// What the user typed, once understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Attack { x: i32, y: i32 },
    Move { direction: Direction, distance: i32 },
    Help,
    Quit,
}

/// Parse one line of input. Range checks are left to the engine so the user
/// sees the same rejections as any other client.
pub fn parse_command(input: &str) -> Result<CliCommand, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Empty input".to_string());
    };
    let args: Vec<&str> = words.collect();
    match verb.to_ascii_lowercase().as_str() {
        "a" | "attack" => {
            let [x, y] = args.as_slice() else {
                return Err("Attack needs two coordinates, e.g. `a 3 2`".to_string());
            };
            let x = x.parse().map_err(|_| format!("Invalid x coordinate '{}'", x))?;
            let y = y.parse().map_err(|_| format!("Invalid y coordinate '{}'", y))?;
            Ok(CliCommand::Attack { x, y })
        }
        "m" | "move" => {
            let [dir, distance] = args.as_slice() else {
                return Err("Move needs a direction and a distance, e.g. `m e 2`".to_string());
            };
            let direction = dir
                .parse()
                .map_err(|_| format!("Unknown direction '{}' - use north/south/east/west", dir))?;
            let distance = distance
                .parse()
                .map_err(|_| format!("Invalid distance '{}'", distance))?;
            Ok(CliCommand::Move {
                direction,
                distance,
            })
        }
        "h" | "help" | "?" => Ok(CliCommand::Help),
        "q" | "quit" | "exit" => Ok(CliCommand::Quit),
        other => Err(format!("Unknown command '{}' - type `h` for help", other)),
    }
}

/// Interactive player reading commands line by line.
pub struct CliPlayer {
    input: Box<dyn BufRead + Send>,
}

impl CliPlayer {
    pub fn new(input: Box<dyn BufRead + Send>) -> Self {
        Self { input }
    }

    pub fn stdin() -> Self {
        Self::new(Box::new(io::BufReader::new(io::stdin())))
    }
}

impl Player for CliPlayer {
    fn select_action(&mut self, state: &GameStateView) -> anyhow::Result<Option<ActionRequest>> {
        loop {
            print!("[turn {}] {} > ", state.turn, state.viewer_id);
            io::stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let (action_type, target, direction, distance) = match parse_command(&line) {
                Ok(CliCommand::Attack { x, y }) => {
                    (ActionType::Attack, Some(Coordinates::new(x, y)), None, None)
                }
                Ok(CliCommand::Move {
                    direction,
                    distance,
                }) => (ActionType::Move, None, Some(direction), Some(distance)),
                Ok(CliCommand::Help) => {
                    println!("{}", HELP);
                    continue;
                }
                Ok(CliCommand::Quit) => return Ok(None),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            return Ok(Some(ActionRequest {
                game_id: state.game_id.clone(),
                player_id: state.viewer_id.clone(),
                action_type,
                target,
                direction,
                distance,
            }));
        }
    }
}
