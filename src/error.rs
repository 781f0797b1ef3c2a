use std::path::PathBuf;

use crate::game::{Move, MoveError, Player};

/// Errors that can occur while an agent picks a move.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("game is already over")]
    GameOver,

    #[error("{player:?} has no legal moves in a position without a winner")]
    NoLegalMoves { player: Player },

    #[error("search produced no candidate move")]
    NoCandidate,

    #[error("search generated illegal move {mv}: {source}")]
    IllegalMove { mv: Move, source: MoveError },

    #[error("input stream closed before a move was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while playing a game between two agents.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("{agent} ({player:?}) played illegal move {mv}: {source}")]
    IllegalMove {
        agent: String,
        player: Player,
        mv: Move,
        source: MoveError,
    },

    #[error("{agent} failed to move: {source}")]
    Agent {
        agent: String,
        source: SearchError,
    },
}

/// Errors that can occur when loading a Q-table.
#[derive(Debug, thiserror::Error)]
pub enum QTableError {
    #[error("failed to read Q-table from {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse Q-table from {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
