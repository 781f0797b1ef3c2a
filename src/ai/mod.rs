mod agent;
mod evaluator;
mod human;
pub mod hybrid;
pub mod mcts;
mod minimax;
pub mod q_table;
mod random;

pub use agent::Agent;
pub use evaluator::{Heuristic, QuixoHeuristic};
pub use human::{parse_move, HumanAgent, ParseMoveError};
pub use hybrid::{Decision, DecisionSource, HybridAgent, HybridConfig};
pub use mcts::{ChildStats, MctsAgent, MctsConfig, MctsSearch, SearchResult};
pub use minimax::{MinimaxAgent, MinimaxSearch};
pub use q_table::{QTable, QTableAgent};
pub use random::RandomAgent;
