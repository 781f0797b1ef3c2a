//! # Quixo Agent
//!
//! A Quixo engine with a hybrid move-selection policy: Monte Carlo tree search
//! while the board is open, depth-limited minimax with a one-ply safety check
//! once it fills up.
//!
//! ## Modules
//!
//! - [`game`] - Core game logic: board, moves, player, state machine
//! - [`ai`] - Agent trait, heuristic, minimax, MCTS, hybrid policy, opponents
//! - [`arena`] - Game and match driver, result tallies
//! - [`config`] - TOML configuration loading and validation
//! - [`error`] - Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
