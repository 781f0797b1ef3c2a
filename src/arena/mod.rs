//! Match driver: plays full games between two agents and tallies results.

pub mod game;
pub mod metrics;

pub use game::{play_game, play_match, ArenaConfig, GameRecord};
pub use metrics::{MatchOutcome, MatchSummary};
