use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::SearchError;
use crate::game::{GameState, Move};

use super::agent::Agent;
use super::mcts::{MctsConfig, MctsSearch};
use super::minimax::MinimaxSearch;

/// Routing parameters for the hybrid policy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Above this many empty cells the position is handed to MCTS directly.
    pub empty_threshold: usize,
    /// Fixed minimax depth for the remaining positions.
    pub minimax_depth: usize,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            empty_threshold: 20,
            minimax_depth: 2,
        }
    }
}

/// Which path produced a hybrid decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Wide-open board, MCTS from the start.
    Mcts,
    /// Minimax candidate that passed the one-ply safety check.
    Minimax,
    /// Minimax candidate handed the opponent a line; MCTS chose instead.
    SafetyFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub mv: Move,
    pub source: DecisionSource,
    /// Minimax value of the candidate, when minimax ran.
    pub minimax_value: Option<f64>,
}

/// Minimax in narrow positions, MCTS on open boards and as a fallback when
/// the minimax choice loses on the spot.
pub struct HybridAgent {
    config: HybridConfig,
    minimax: MinimaxSearch,
    mcts: MctsSearch,
}

impl HybridAgent {
    pub fn new(config: HybridConfig, mcts: MctsConfig) -> Self {
        Self::with_rng(config, mcts, StdRng::from_os_rng())
    }

    pub fn with_seed(config: HybridConfig, mcts: MctsConfig, seed: u64) -> Self {
        Self::with_rng(config, mcts, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: HybridConfig, mcts: MctsConfig, rng: StdRng) -> Self {
        HybridAgent {
            config,
            minimax: MinimaxSearch::new(),
            mcts: MctsSearch::new(mcts, rng),
        }
    }

    pub fn with_minimax(mut self, minimax: MinimaxSearch) -> Self {
        self.minimax = minimax;
        self
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Pick a move for the player to move and report how it was chosen.
    pub fn decide(&mut self, state: &GameState) -> Result<Decision, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::GameOver);
        }

        let player = state.current_player();
        let budget = self.mcts.config().simulations;
        let empty = state.board().count_empty();

        if empty > self.config.empty_threshold {
            debug!(empty, threshold = self.config.empty_threshold, "open board, using mcts");
            let mv = self.mcts.run(state, player, budget)?;
            return Ok(Decision {
                mv,
                source: DecisionSource::Mcts,
                minimax_value: None,
            });
        }

        let depth = self.config.minimax_depth.max(1);
        let (candidate, value) =
            self.minimax
                .search(state, player, depth, f64::NEG_INFINITY, f64::INFINITY, player)?;
        let candidate = candidate.ok_or(SearchError::NoCandidate)?;

        let after = state
            .with_move(candidate, player)
            .map_err(|source| SearchError::IllegalMove {
                mv: candidate,
                source,
            })?;

        match after.check_winner() {
            Some(winner) if winner != player => {
                debug!(%candidate, value, "minimax candidate loses immediately, falling back to mcts");
                let mv = self.mcts.run_excluding(state, player, budget, &[candidate])?;
                Ok(Decision {
                    mv,
                    source: DecisionSource::SafetyFallback,
                    minimax_value: Some(value),
                })
            }
            _ => {
                debug!(%candidate, value, depth, "minimax move");
                Ok(Decision {
                    mv: candidate,
                    source: DecisionSource::Minimax,
                    minimax_value: Some(value),
                })
            }
        }
    }
}

impl Agent for HybridAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        self.decide(state).map(|d| d.mv)
    }

    fn name(&self) -> &str {
        "Hybrid"
    }
}
