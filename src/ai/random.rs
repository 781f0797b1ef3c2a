use crate::error::SearchError;
use crate::game::{GameState, Move};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::GameOver);
        }
        let player = state.current_player();
        let moves: Vec<Move> = state.legal_moves(player).collect();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves { player });
        }
        let idx = self.rng.random_range(0..moves.len());
        Ok(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
