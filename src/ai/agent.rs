use crate::error::SearchError;
use crate::game::{GameState, Move};

/// Universal interface for every move source: search agents, random play,
/// a human at the terminal or a trained Q-table.
///
/// The agent always moves for `state.current_player()`. It never mutates the
/// caller's state; any exploration happens on copies.
pub trait Agent {
    /// Pick a move for the player to move in `state`.
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        (**self).make_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
