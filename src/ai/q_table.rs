//! Read-only access to action values produced by an offline trainer.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QTableError, SearchError};
use crate::game::{GameState, Move};

use super::agent::Agent;

/// Key for a position: the board in compact row form, then the player to move.
///
/// `"0000./....1/....1/....1/....1|0"`
pub fn state_key(state: &GameState) -> String {
    let rows = state.board().to_string().replace('\n', "/");
    format!("{rows}|{}", state.current_player().id())
}

/// Key for a move, in the same `x-y-D` form the human adapter reads.
pub fn action_key(mv: Move) -> String {
    mv.to_string()
}

/// Mapping from state key to action key to value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QTable {
    /// Value reported for unseen state-action pairs.
    #[serde(default)]
    pub default_value: f64,
    #[serde(default)]
    entries: HashMap<String, HashMap<String, f64>>,
}

impl QTable {
    pub fn new(default_value: f64) -> Self {
        QTable {
            default_value,
            entries: HashMap::new(),
        }
    }

    /// Load a table written by the trainer as JSON.
    pub fn load(path: &Path) -> Result<Self, QTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| QTableError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| QTableError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn insert(&mut self, state: &GameState, mv: Move, value: f64) {
        self.entries
            .entry(state_key(state))
            .or_default()
            .insert(action_key(mv), value);
    }

    /// Value of playing `mv` in `state`; `default_value` when unseen.
    pub fn get(&self, state: &GameState, mv: Move) -> f64 {
        self.entries
            .get(&state_key(state))
            .and_then(|actions| actions.get(&action_key(mv)))
            .copied()
            .unwrap_or(self.default_value)
    }

    /// Number of stored state-action values.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Greedy agent over a fixed Q-table. Ties keep the first legal move.
pub struct QTableAgent {
    table: QTable,
}

impl QTableAgent {
    pub fn new(table: QTable) -> Self {
        QTableAgent { table }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }
}

impl Agent for QTableAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::GameOver);
        }
        let player = state.current_player();
        let mut best: Option<(Move, f64)> = None;
        for mv in state.legal_moves(player) {
            let value = self.table.get(state, mv);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((mv, value));
            }
        }
        best.map(|(mv, _)| mv)
            .ok_or(SearchError::NoLegalMoves { player })
    }

    fn name(&self) -> &str {
        "Q-table"
    }
}
