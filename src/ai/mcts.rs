use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::trace;

use crate::error::SearchError;
use crate::game::{GameState, Move, Player};

use super::agent::Agent;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Monte Carlo tree search parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of select/expand/rollout/backup cycles per decision.
    pub simulations: usize,
    /// Exploration constant in the UCB1 formula.
    pub exploration: f64,
    /// Rollouts stop after this many plies and count as a draw.
    pub rollout_max_moves: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            simulations: 500,
            exploration: std::f64::consts::SQRT_2,
            rollout_max_moves: 200,
        }
    }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Statistics for one root child after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u32,
    /// Average rollout score for the player to move at the root.
    pub mean_score: f64,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Most visited root child.
    pub best: Move,
    /// Root children in expansion order.
    pub children: Vec<ChildStats>,
    pub simulations: usize,
}

impl SearchResult {
    pub fn visits(&self, mv: Move) -> u32 {
        self.children
            .iter()
            .find(|c| c.mv == mv)
            .map_or(0, |c| c.visits)
    }
}

// ─── MCTS Tree (arena-based) ──────────────────────────────────────────────────

struct MctsNode {
    state: GameState,
    /// Move that produced this node; `None` at the root.
    mv: Option<Move>,
    /// Player who made `mv`. `score` is kept from this player's perspective.
    mover: Player,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Vec<Move>,
    visit_count: u32,
    score: f64,
}

struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    /// Install a root for `state`, leaving `excluded` moves out of the root's
    /// candidates unless nothing else is legal.
    fn new(state: GameState, excluded: &[Move]) -> Self {
        let player = state.current_player();
        let legal: Vec<Move> = state.legal_moves(player).collect();
        let kept: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|mv| !excluded.contains(mv))
            .collect();
        let untried = if kept.is_empty() { legal } else { kept };

        let mut nodes = Vec::with_capacity(1024);
        nodes.push(MctsNode {
            state,
            mv: None,
            mover: player.other(),
            parent: None,
            children: Vec::new(),
            untried,
            visit_count: 0,
            score: 0.0,
        });
        MctsTree { nodes }
    }

    /// Descend from the root through fully expanded nodes using UCB1.
    fn select(&self, exploration: f64) -> usize {
        let mut current = 0;
        loop {
            let node = &self.nodes[current];
            if !node.untried.is_empty() || node.children.is_empty() {
                return current;
            }
            current = self.select_best_child(current, exploration);
        }
    }

    /// Child with the highest UCB1 score; the first one wins ties.
    fn select_best_child(&self, node_idx: usize, exploration: f64) -> usize {
        let node = &self.nodes[node_idx];
        let log_parent = (node.visit_count.max(1) as f64).ln();

        let mut best_child = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &ci in &node.children {
            let child = &self.nodes[ci];
            let visits = child.visit_count.max(1) as f64;
            let ucb = child.score / visits + exploration * (log_parent / visits).sqrt();
            if ucb > best_score {
                best_score = ucb;
                best_child = ci;
            }
        }
        best_child
    }

    /// Instantiate one random untried child of `node_idx`.
    fn expand(&mut self, node_idx: usize, rng: &mut StdRng) -> Result<usize, SearchError> {
        let node = &mut self.nodes[node_idx];
        let pick = rng.random_range(0..node.untried.len());
        let mv = node.untried.swap_remove(pick);
        let mover = node.state.current_player();
        let child_state = node
            .state
            .with_move(mv, mover)
            .map_err(|source| SearchError::IllegalMove { mv, source })?;
        let untried = child_state
            .legal_moves(child_state.current_player())
            .collect();

        let idx = self.nodes.len();
        self.nodes.push(MctsNode {
            state: child_state,
            mv: Some(mv),
            mover,
            parent: Some(node_idx),
            children: Vec::new(),
            untried,
            visit_count: 0,
            score: 0.0,
        });
        self.nodes[node_idx].children.push(idx);
        Ok(idx)
    }

    /// Propagate a rollout outcome from `leaf` to the root.
    fn backup(&mut self, leaf: usize, winner: Option<Player>) {
        let mut current = Some(leaf);
        while let Some(idx) = current {
            let node = &mut self.nodes[idx];
            node.visit_count += 1;
            node.score += match winner {
                Some(w) if w == node.mover => 1.0,
                Some(_) => 0.0,
                None => 0.5,
            };
            current = node.parent;
        }
    }

    fn root_children(&self) -> Vec<ChildStats> {
        self.nodes[0]
            .children
            .iter()
            .filter_map(|&ci| {
                let child = &self.nodes[ci];
                child.mv.map(|mv| ChildStats {
                    mv,
                    visits: child.visit_count,
                    mean_score: if child.visit_count == 0 {
                        0.0
                    } else {
                        child.score / child.visit_count as f64
                    },
                })
            })
            .collect()
    }
}

// ─── Search ───────────────────────────────────────────────────────────────────

/// Monte Carlo tree search with uniform random rollouts.
///
/// The tree lives only for the duration of one call.
pub struct MctsSearch {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsSearch {
    pub fn new(config: MctsConfig, rng: StdRng) -> Self {
        MctsSearch { config, rng }
    }

    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Most visited move for `player` after `budget` simulations.
    pub fn run(
        &mut self,
        state: &GameState,
        player: Player,
        budget: usize,
    ) -> Result<Move, SearchError> {
        self.run_excluding(state, player, budget, &[])
    }

    /// Like [`run`](Self::run), but never returns a move from `excluded`
    /// while any other legal move exists.
    pub fn run_excluding(
        &mut self,
        state: &GameState,
        player: Player,
        budget: usize,
        excluded: &[Move],
    ) -> Result<Move, SearchError> {
        self.search(state, player, budget, excluded).map(|r| r.best)
    }

    /// Full search returning per-move statistics for the root.
    pub fn search(
        &mut self,
        state: &GameState,
        player: Player,
        budget: usize,
        excluded: &[Move],
    ) -> Result<SearchResult, SearchError> {
        let root = GameState::from_board(*state.board(), player);
        if root.is_terminal() {
            return Err(SearchError::GameOver);
        }

        let mut tree = MctsTree::new(root, excluded);
        if tree.nodes[0].untried.is_empty() {
            return Err(SearchError::NoLegalMoves { player });
        }

        for _ in 0..budget {
            self.run_simulation(&mut tree)?;
        }

        let children = tree.root_children();
        // Robust child: most visits, first expanded wins ties.
        let best = children
            .iter()
            .fold(None::<&ChildStats>, |best, c| match best {
                Some(b) if b.visits >= c.visits => Some(b),
                _ => Some(c),
            })
            .map(|c| c.mv)
            .ok_or(SearchError::NoCandidate)?;

        trace!(
            simulations = budget,
            nodes = tree.nodes.len(),
            best = %best,
            "mcts search finished"
        );

        Ok(SearchResult {
            best,
            children,
            simulations: budget,
        })
    }

    /// One select/expand/rollout/backup cycle.
    fn run_simulation(&mut self, tree: &mut MctsTree) -> Result<(), SearchError> {
        let selected = tree.select(self.config.exploration);

        if let Some(winner) = tree.nodes[selected].state.check_winner() {
            tree.backup(selected, Some(winner));
            return Ok(());
        }

        if tree.nodes[selected].untried.is_empty() {
            // Non-terminal and nothing to expand: score as a draw.
            tree.backup(selected, None);
            return Ok(());
        }

        let leaf = tree.expand(selected, &mut self.rng)?;
        let winner = self.rollout(&tree.nodes[leaf].state)?;
        tree.backup(leaf, winner);
        Ok(())
    }

    /// Play uniformly random moves on a copy of `state` until someone wins or
    /// the ply cap is reached.
    fn rollout(&mut self, state: &GameState) -> Result<Option<Player>, SearchError> {
        let mut state = *state;
        let mut moves = Vec::with_capacity(44);

        for _ in 0..self.config.rollout_max_moves {
            if let Some(winner) = state.check_winner() {
                return Ok(Some(winner));
            }
            let player = state.current_player();
            moves.clear();
            moves.extend(state.legal_moves(player));
            if moves.is_empty() {
                return Ok(None);
            }
            let mv = moves[self.rng.random_range(0..moves.len())];
            state
                .apply(mv, player)
                .map_err(|source| SearchError::IllegalMove { mv, source })?;
        }

        Ok(state.check_winner())
    }
}

// ─── Agent ────────────────────────────────────────────────────────────────────

/// Pure MCTS agent.
pub struct MctsAgent {
    search: MctsSearch,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        MctsAgent {
            search: MctsSearch::new(config, StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        MctsAgent {
            search: MctsSearch::with_seed(config, seed),
        }
    }
}

impl Agent for MctsAgent {
    fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
        let budget = self.search.config().simulations;
        self.search.run(state, state.current_player(), budget)
    }

    fn name(&self) -> &str {
        "MCTS"
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
