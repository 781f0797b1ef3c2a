use std::io::{BufRead, Write};

use crate::error::SearchError;
use crate::game::{Direction, GameState, Move, Position, SIZE};

use super::agent::Agent;

/// Errors from parsing a `<x>-<y>-<T|B|L|R>` move command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("expected <x>-<y>-<T|B|L|R>, got '{0}'")]
    Format(String),
    #[error("invalid coordinate '{0}'")]
    Coordinate(String),
    #[error("invalid direction '{0}' (expected T, B, L or R)")]
    Direction(String),
    #[error("position ({x}, {y}) is outside the board")]
    OutOfRange { x: usize, y: usize },
}

/// Parse a move command such as `4-0-L`.
pub fn parse_move(text: &str) -> Result<Move, ParseMoveError> {
    let parts: Vec<&str> = text.trim().split('-').map(str::trim).collect();
    let [x, y, d] = parts.as_slice() else {
        return Err(ParseMoveError::Format(text.trim().to_string()));
    };

    let x: usize = x
        .parse()
        .map_err(|_| ParseMoveError::Coordinate(x.to_string()))?;
    let y: usize = y
        .parse()
        .map_err(|_| ParseMoveError::Coordinate(y.to_string()))?;
    if x >= SIZE || y >= SIZE {
        return Err(ParseMoveError::OutOfRange { x, y });
    }

    let mut chars = d.chars();
    let direction = match (chars.next(), chars.next()) {
        (Some(c), None) => Direction::from_letter(c),
        _ => None,
    }
    .ok_or_else(|| ParseMoveError::Direction(d.to_string()))?;

    Ok(Move::new(Position::new(x, y), direction))
}

/// Reads moves from a text stream, re-prompting until a legal one arrives.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanAgent { input, output }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        let player = state.current_player();
        writeln!(self.output, "{}", state.board())?;

        loop {
            writeln!(self.output, "{} to move, format <x-y-T/B/L/R>", player.name())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SearchError::InputClosed);
            }

            let mv = match parse_move(&line) {
                Ok(mv) => mv,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            match state.check_move(mv, player) {
                Ok(()) => return Ok(mv),
                Err(e) => writeln!(self.output, "illegal move {mv}: {e}")?,
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}
