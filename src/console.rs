//! Line-oriented command parsing for the interactive console.
//!
//! Single keys follow the in-game help text; common full words and a couple of
//! two-word forms (`go north`, `use item`) are accepted as aliases.

use thiserror::Error;

use crate::adventure::{Action, Direction};

pub const COMMAND_HINT: &str = "Unknown command. Press h for help, q to quit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command: {0:?}")]
pub struct UnknownCommand(pub String);

/// Parse one line of console input.
pub fn parse_command(raw: &str) -> Result<Command, UnknownCommand> {
    let lower = raw.trim().to_lowercase();
    if lower.chars().all(|c| c == '?' || c.is_whitespace()) && lower.contains('?') {
        return Ok(Command::Action(Action::Help));
    }

    let tokens: Vec<&str> = lower.split_whitespace().collect();
    let word = match tokens.as_slice() {
        [] => return Err(UnknownCommand(String::new())),
        ["go" | "move" | "walk", dir] => {
            return compass(dir)
                .map(|d| Command::Action(Action::Move(d)))
                .ok_or_else(|| UnknownCommand(raw.trim().to_string()));
        }
        ["use", _] => "use",
        [one] => *one,
        _ => return Err(UnknownCommand(raw.trim().to_string())),
    };

    let action = match word {
        "h" | "help" => Action::Help,
        "m" | "map" => Action::DisplayMap,
        "i" | "inv" | "inventory" => Action::DisplayInventory,
        "w" | "north" | "up" => Action::Move(Direction::North),
        "s" | "south" | "down" => Action::Move(Direction::South),
        "d" | "east" | "right" => Action::Move(Direction::East),
        "a" | "west" | "left" => Action::Move(Direction::West),
        "g" | "grab" | "take" | "get" => Action::Grab,
        "u" | "use" => Action::Use,
        "n" | "inspect" | "examine" => Action::Inspect,
        "l" | "look" => Action::Look,
        "c" | "clear" | "cls" => Action::Clear,
        "r" | "reset" | "restart" => Action::Reset,
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => return Err(UnknownCommand(raw.trim().to_string())),
    };
    Ok(Command::Action(action))
}

/// Direction after `go`: compass letters or full names.
fn compass(word: &str) -> Option<Direction> {
    match word {
        "n" | "north" => Some(Direction::North),
        "s" | "south" => Some(Direction::South),
        "e" | "east" => Some(Direction::East),
        "w" | "west" => Some(Direction::West),
        _ => None,
    }
}
