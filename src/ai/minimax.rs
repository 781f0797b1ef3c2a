use tracing::trace;

use crate::error::SearchError;
use crate::game::{GameState, Move, Player};

use super::agent::Agent;
use super::evaluator::{Heuristic, QuixoHeuristic};

/// Depth-limited minimax with alpha-beta pruning.
///
/// Every branch works on its own copy of the state. Children are visited in
/// [`GameState::legal_moves`] order and ties keep the first move seen, so a
/// search is fully reproducible.
pub struct MinimaxSearch {
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxSearch {
    pub fn new() -> Self {
        MinimaxSearch {
            heuristic: Box::new(QuixoHeuristic),
        }
    }

    pub fn with_heuristic(heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxSearch { heuristic }
    }

    /// Best move for `root_player` from the root of a search.
    pub fn best_move(
        &self,
        state: &GameState,
        depth: usize,
    ) -> Result<(Option<Move>, f64), SearchError> {
        let root = state.current_player();
        self.search(state, root, depth, f64::NEG_INFINITY, f64::INFINITY, root)
    }

    /// Search `state` with `mover` to play. Values are always from
    /// `root_player`'s perspective: `+inf` for a root win, `-inf` for a loss.
    pub fn search(
        &self,
        state: &GameState,
        mover: Player,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        root_player: Player,
    ) -> Result<(Option<Move>, f64), SearchError> {
        if let Some(winner) = state.check_winner() {
            let value = if winner == root_player {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
            return Ok((None, value));
        }

        if depth == 0 {
            return Ok((None, self.heuristic.evaluate(state.board(), root_player)));
        }

        let maximizing = mover == root_player;
        let mut best_move = None;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in state.legal_moves(mover) {
            let next = state
                .with_move(mv, mover)
                .map_err(|source| SearchError::IllegalMove { mv, source })?;
            let (_, value) = self.search(&next, mover.other(), depth - 1, alpha, beta, root_player)?;

            if maximizing {
                if best_move.is_none() || value > best {
                    best = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
            } else {
                if best_move.is_none() || value < best {
                    best = value;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
            }

            if alpha >= beta {
                break;
            }
        }

        if best_move.is_none() {
            return Err(SearchError::NoLegalMoves { player: mover });
        }

        Ok((best_move, best))
    }
}

impl Default for MinimaxSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain minimax agent at a fixed depth.
pub struct MinimaxAgent {
    depth: usize,
    search: MinimaxSearch,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            search: MinimaxSearch::new(),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth,
            search: MinimaxSearch::with_heuristic(heuristic),
        }
    }
}

impl Agent for MinimaxAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::GameOver);
        }
        let (mv, value) = self.search.best_move(state, self.depth.max(1))?;
        trace!(depth = self.depth, value, "minimax move");
        mv.ok_or(SearchError::NoCandidate)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{Board, Direction, Position};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn state(rows: &str, player: Player) -> GameState {
        GameState::from_board(rows.parse::<Board>().unwrap(), player)
    }

    /// Exhaustive minimax without pruning, same ordering and tie rules.
    fn full_minimax(
        h: &dyn Heuristic,
        state: &GameState,
        mover: Player,
        depth: usize,
        root: Player,
    ) -> f64 {
        if let Some(winner) = state.check_winner() {
            return if winner == root {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        if depth == 0 {
            return h.evaluate(state.board(), root);
        }
        let values = state.legal_moves(mover).map(|mv| {
            let next = state.with_move(mv, mover).unwrap();
            full_minimax(h, &next, mover.other(), depth - 1, root)
        });
        if mover == root {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }

    fn random_position(rng: &mut StdRng, plies: usize) -> GameState {
        let mut state = GameState::initial();
        for _ in 0..plies {
            let player = state.current_player();
            let moves: Vec<Move> = state.legal_moves(player).collect();
            let next = state.with_move(moves[rng.random_range(0..moves.len())], player).unwrap();
            if next.is_terminal() {
                break;
            }
            state = next;
        }
        state
    }

    #[test]
    fn takes_winning_move() {
        // Only pushing (4,0) in from the left completes row 0; One owns the
        // rest of column 4.
        let state = state("0000./....1/....1/....1/....1", Player::Zero);
        let search = MinimaxSearch::new();
        let winning = Move::new(Position::new(4, 0), Direction::Left);

        for depth in 1..=2 {
            let (mv, value) = search.best_move(&state, depth).unwrap();
            assert_eq!(mv, Some(winning), "depth {depth}");
            assert_eq!(value, f64::INFINITY, "depth {depth}");
        }
    }

    #[test]
    fn blocks_opponent_win() {
        // One threatens (4,0)-Left next turn; at depth 2 Zero must not allow it.
        let state = state("1111./...../..0../...../0....", Player::Zero);
        let search = MinimaxSearch::new();
        let (mv, value) = search.best_move(&state, 2).unwrap();
        let mv = mv.unwrap();
        assert!(value > f64::NEG_INFINITY, "Zero has a defence, got {value}");

        let after = state.with_move(mv, Player::Zero).unwrap();
        for reply in after.legal_moves(Player::One) {
            let next = after.with_move(reply, Player::One).unwrap();
            assert_ne!(next.check_winner(), Some(Player::One), "{mv} allows {reply}");
        }
    }

    #[test]
    fn terminal_and_leaf_values() {
        let search = MinimaxSearch::new();
        let won = state("00000/...../...../...../.....", Player::One);
        assert_eq!(
            search
                .search(&won, Player::One, 3, f64::NEG_INFINITY, f64::INFINITY, Player::Zero)
                .unwrap(),
            (None, f64::INFINITY)
        );
        assert_eq!(
            search
                .search(&won, Player::One, 3, f64::NEG_INFINITY, f64::INFINITY, Player::One)
                .unwrap()
                .1,
            f64::NEG_INFINITY
        );

        let quiet = GameState::initial();
        let (mv, value) = search
            .search(&quiet, Player::Zero, 0, f64::NEG_INFINITY, f64::INFINITY, Player::Zero)
            .unwrap();
        assert_eq!(mv, None);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn pruning_matches_full_minimax() {
        let h = QuixoHeuristic;
        let search = MinimaxSearch::new();
        let mut rng = StdRng::seed_from_u64(5);

        for plies in [0, 4, 9, 14, 20] {
            let state = random_position(&mut rng, plies);
            let root = state.current_player();
            for depth in 1..=2 {
                let (_, pruned) = search.best_move(&state, depth).unwrap();
                let full = full_minimax(&h, &state, root, depth, root);
                assert_eq!(pruned, full, "plies {plies}, depth {depth}");
            }
        }

        let state = random_position(&mut rng, 12);
        let root = state.current_player();
        let (_, pruned) = search.best_move(&state, 3).unwrap();
        assert_eq!(pruned, full_minimax(&h, &state, root, 3, root));
    }

    #[test]
    fn search_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(17);
        let state = random_position(&mut rng, 10);
        let search = MinimaxSearch::new();
        let first = search.best_move(&state, 2).unwrap();
        let second = search.best_move(&state, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn search_does_not_mutate_state() {
        let state = state("01.1./..1../.00../0..../....1", Player::One);
        let before = state;
        let _ = MinimaxSearch::new().best_move(&state, 2).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn beats_random_agent() {
        let games = 6;
        let mut wins = 0;
        for seed in 0..games {
            let mut minimax = MinimaxAgent::new(1);
            let mut random = RandomAgent::with_seed(seed);
            let mut state = GameState::initial();
            let minimax_player = if seed % 2 == 0 { Player::Zero } else { Player::One };

            for _ in 0..200 {
                if state.is_terminal() {
                    break;
                }
                let player = state.current_player();
                let mv = if player == minimax_player {
                    minimax.make_move(&state).unwrap()
                } else {
                    random.make_move(&state).unwrap()
                };
                state.apply(mv, player).unwrap();
            }

            if state.check_winner() == Some(minimax_player) {
                wins += 1;
            }
        }
        assert!(wins >= 4, "minimax won only {wins}/{games} against random");
    }

    #[test]
    fn name_is_minimax() {
        assert_eq!(MinimaxAgent::new(2).name(), "Minimax");
    }
}
