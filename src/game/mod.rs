//! Core Quixo game logic: board representation, push moves, players and the
//! game state with legality and win detection.

mod board;
mod moves;
mod player;
mod state;

pub use board::{Board, Cell, ParseBoardError, LINE_COUNT, SIZE};
pub use moves::{Direction, Move, Position};
pub use player::Player;
pub use state::{GameState, LegalMoves, MoveError, BORDER};
