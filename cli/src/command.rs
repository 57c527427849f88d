use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;
use uncover_core::{Coord, Position};

pub const USAGE: &str = "Commands: r <row> <col> (reveal), f <row> <col> (flag), \
n [<rows> <cols> <mines>] (new game), p (print), h (help), q (quit)";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Position),
    Flag(Position),
    NewGame(Option<(i32, i32, i32)>),
    Print,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Expected {expected} numbers after `{command}`")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid number: {0}")]
    Number(#[from] ParseIntError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match head.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Self::Reveal(position("reveal", &rest)?)),
            "f" | "flag" => Ok(Self::Flag(position("flag", &rest)?)),
            "n" | "new" => match rest.as_slice() {
                [] => Ok(Self::NewGame(None)),
                [rows, cols, mines] => Ok(Self::NewGame(Some((
                    rows.parse()?,
                    cols.parse()?,
                    mines.parse()?,
                )))),
                _ => Err(CommandError::Arity {
                    command: "new",
                    expected: "0 or 3",
                }),
            },
            "p" | "print" => Ok(Self::Print),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn position(command: &'static str, args: &[&str]) -> Result<Position, CommandError> {
    match args {
        [row, col] => Ok((row.parse::<Coord>()?, col.parse::<Coord>()?)),
        _ => Err(CommandError::Arity {
            command,
            expected: "2",
        }),
    }
}
