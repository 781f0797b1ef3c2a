use super::board::{Board, Cell, SIZE};
use super::moves::{Direction, Move, Position};
use super::Player;

/// Outer-ring cells in row-major order; this is the move generation order.
pub const BORDER: [Position; 16] = [
    Position::new(0, 0),
    Position::new(1, 0),
    Position::new(2, 0),
    Position::new(3, 0),
    Position::new(4, 0),
    Position::new(0, 1),
    Position::new(4, 1),
    Position::new(0, 2),
    Position::new(4, 2),
    Position::new(0, 3),
    Position::new(4, 3),
    Position::new(0, 4),
    Position::new(1, 4),
    Position::new(2, 4),
    Position::new(3, 4),
    Position::new(4, 4),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position is outside the {size}x{size} board", size = SIZE)]
    OutOfBounds,
    #[error("only pieces on the outer ring can be moved")]
    NotOnBorder,
    #[error("piece cannot be pushed back in from the side it was taken from")]
    InvalidDirection,
    #[error("cell belongs to the opponent")]
    OpponentPiece,
    #[error("game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Zero, // Player 0 starts
        }
    }

    /// Build a state from an arbitrary board, e.g. a test position.
    pub fn from_board(board: Board, current_player: Player) -> Self {
        GameState {
            board,
            current_player,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Winner of the position, if any.
    ///
    /// When both players own a complete line, the player to move wins: the
    /// previous mover completed the opponent's line, which loses even if the
    /// same push completed their own.
    pub fn check_winner(&self) -> Option<Player> {
        let zero = self.board.has_line(Cell::Zero);
        let one = self.board.has_line(Cell::One);
        match (zero, one) {
            (true, true) => Some(self.current_player),
            (true, false) => Some(Player::Zero),
            (false, true) => Some(Player::One),
            (false, false) => None,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.check_winner().is_some()
    }

    /// Lazily enumerate the legal moves for `player`. Empty once the game is
    /// over. Clone the iterator to restart it.
    pub fn legal_moves(&self, player: Player) -> LegalMoves<'_> {
        LegalMoves {
            board: &self.board,
            cell: player.to_cell(),
            border_idx: if self.is_terminal() { BORDER.len() } else { 0 },
            dir_idx: 0,
        }
    }

    /// Validate `mv` for `player` without touching the board.
    pub fn check_move(&self, mv: Move, player: Player) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !mv.from.in_bounds() {
            return Err(MoveError::OutOfBounds);
        }
        if !mv.from.is_border() {
            return Err(MoveError::NotOnBorder);
        }
        if self.board.get(mv.from) == player.other().to_cell() {
            return Err(MoveError::OpponentPiece);
        }
        if !mv.direction.is_valid_from(mv.from) {
            return Err(MoveError::InvalidDirection);
        }
        Ok(())
    }

    /// Apply `mv` for `player` in place and hand the turn to the opponent.
    /// On error the state is left untouched.
    pub fn apply(&mut self, mv: Move, player: Player) -> Result<(), MoveError> {
        self.check_move(mv, player)?;
        self.board.push(mv.from, mv.direction, player.to_cell())?;
        self.current_player = player.other();
        Ok(())
    }

    /// Apply a move and return new state (immutable)
    pub fn with_move(&self, mv: Move, player: Player) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply(mv, player)?;
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Iterator over legal moves in [`BORDER`] order, directions in
/// [`Direction::ALL`] order.
#[derive(Debug, Clone)]
pub struct LegalMoves<'a> {
    board: &'a Board,
    cell: Cell,
    border_idx: usize,
    dir_idx: usize,
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while self.border_idx < BORDER.len() {
            let from = BORDER[self.border_idx];
            let owner = self.board.get(from);
            if owner != Cell::Empty && owner != self.cell {
                self.border_idx += 1;
                self.dir_idx = 0;
                continue;
            }
            while self.dir_idx < Direction::ALL.len() {
                let direction = Direction::ALL[self.dir_idx];
                self.dir_idx += 1;
                if direction.is_valid_from(from) {
                    return Some(Move::new(from, direction));
                }
            }
            self.border_idx += 1;
            self.dir_idx = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn state(rows: &str, player: Player) -> GameState {
        GameState::from_board(rows.parse().unwrap(), player)
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Zero);
        assert!(!state.is_terminal());
        assert_eq!(state.check_winner(), None);
    }

    #[test]
    fn test_empty_board_has_44_moves() {
        let state = GameState::initial();
        let moves: Vec<Move> = state.legal_moves(Player::Zero).collect();
        assert_eq!(moves.len(), 44);

        let mut cells: Vec<Position> = moves.iter().map(|m| m.from).collect();
        cells.dedup();
        assert_eq!(cells, BORDER.to_vec());

        for from in BORDER {
            let n = moves.iter().filter(|m| m.from == from).count();
            let expected = if from.is_corner() { 2 } else { 3 };
            assert_eq!(n, expected, "{from:?}");
        }
    }

    #[test]
    fn test_legal_moves_is_restartable() {
        let state = GameState::initial();
        let moves = state.legal_moves(Player::One);
        let first: Vec<Move> = moves.clone().collect();
        let second: Vec<Move> = moves.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_legal_moves_skip_opponent_cells() {
        let state = state("1..../...../...../...../.....", Player::Zero);
        assert!(state
            .legal_moves(Player::Zero)
            .all(|m| m.from != Position::new(0, 0)));
        assert_eq!(state.legal_moves(Player::Zero).count(), 42);
        assert_eq!(state.legal_moves(Player::One).count(), 44);
    }

    #[test]
    fn test_apply_move() {
        let mut state = GameState::initial();
        let mv = Move::new(Position::new(2, 0), Direction::Bottom);
        state.apply(mv, Player::Zero).unwrap();

        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.board().get(Position::new(2, 4)), Cell::Zero);
        assert_eq!(state.board().count(Cell::Zero), 1);
    }

    #[test]
    fn test_apply_rejects_opponent_piece() {
        let mut state = state("1..../...../...../...../.....", Player::Zero);
        let before = state;
        let mv = Move::new(Position::new(0, 0), Direction::Right);
        assert_eq!(state.apply(mv, Player::Zero), Err(MoveError::OpponentPiece));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_rejects_interior_and_same_side() {
        let mut state = GameState::initial();
        assert_eq!(
            state.apply(Move::new(Position::new(1, 1), Direction::Top), Player::Zero),
            Err(MoveError::NotOnBorder)
        );
        assert_eq!(
            state.apply(Move::new(Position::new(0, 0), Direction::Top), Player::Zero),
            Err(MoveError::InvalidDirection)
        );
        assert_eq!(
            state.apply(Move::new(Position::new(7, 0), Direction::Left), Player::Zero),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_apply_rejects_finished_game() {
        let mut state = state("00000/...../...../...../.....", Player::One);
        assert_eq!(
            state.apply(Move::new(Position::new(0, 4), Direction::Top), Player::One),
            Err(MoveError::GameOver)
        );
        assert_eq!(state.legal_moves(Player::One).count(), 0);
    }

    #[test]
    fn test_win_detection() {
        let mut state = state("0000./...../...../...../.....", Player::Zero);
        state
            .apply(Move::new(Position::new(4, 0), Direction::Left), Player::Zero)
            .unwrap();
        assert_eq!(state.check_winner(), Some(Player::Zero));
    }

    #[test]
    fn test_simultaneous_lines_go_to_player_to_move() {
        let both = "00000/...../...../...../11111";
        assert_eq!(state(both, Player::One).check_winner(), Some(Player::One));
        assert_eq!(state(both, Player::Zero).check_winner(), Some(Player::Zero));
    }

    #[test]
    fn test_pushing_opponent_line_loses() {
        // Pushing column 0 down completes Zero's row 0 and One's row 2 at once.
        let mut state = state("10000/1...0/.1111/00..1/.10..", Player::Zero);
        let mv = Move::new(Position::new(0, 2), Direction::Top);
        state.apply(mv, Player::Zero).unwrap();
        assert!(state.board().has_line(Cell::Zero));
        assert!(state.board().has_line(Cell::One));
        assert_eq!(state.check_winner(), Some(Player::One));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = state("01.1./..1../...../0..../....1", Player::One);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.apply(Move::new(Position::new(2, 0), Direction::Bottom), Player::One)
            .unwrap();
        assert_ne!(copy.board(), original.board());
        assert_eq!(
            original.board(),
            &"01.1./..1../...../0..../....1".parse::<Board>().unwrap()
        );
    }

    #[test]
    fn test_random_playouts_only_generate_legal_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut state = GameState::initial();
            let mut counts = [0usize; 2];
            for _ in 0..150 {
                let player = state.current_player();
                let moves: Vec<Move> = state.legal_moves(player).collect();
                if moves.is_empty() {
                    break;
                }
                for &mv in &moves {
                    assert_eq!(state.check_move(mv, player), Ok(()));
                }
                let mv = moves[rng.random_range(0..moves.len())];
                state.apply(mv, player).unwrap();

                // Pieces are never removed from the board.
                let now = [state.board().count(Cell::Zero), state.board().count(Cell::One)];
                assert!(now[0] >= counts[0] && now[1] >= counts[1]);
                counts = now;
            }
        }
    }
}
