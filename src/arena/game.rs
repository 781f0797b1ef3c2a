use tracing::info;

use crate::ai::Agent;
use crate::error::ArenaError;
use crate::game::{GameState, Move, Player};

use super::metrics::{MatchOutcome, MatchSummary};

/// Match driver configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: usize,
    /// A game without a winner after this many plies is a draw.
    pub max_turns: usize,
    /// Swap seats every other game so the tested agent also plays second.
    pub alternate_seats: bool,
    /// Seed for every random source; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games: 100,
            max_turns: 300,
            alternate_seats: true,
            seed: None,
        }
    }
}

/// How a single game ended.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Option<Player>,
    pub moves: Vec<Move>,
    pub final_state: GameState,
}

impl GameRecord {
    pub fn turns(&self) -> usize {
        self.moves.len()
    }
}

/// Play one game from the initial position. `first` moves first.
pub fn play_game(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    max_turns: usize,
) -> Result<GameRecord, ArenaError> {
    let mut state = GameState::initial();
    let mut moves = Vec::new();

    while moves.len() < max_turns && !state.is_terminal() {
        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Zero => &mut *first,
            Player::One => &mut *second,
        };

        let mv = match agent.make_move(&state) {
            Ok(mv) => mv,
            Err(source) => {
                return Err(ArenaError::Agent {
                    agent: agent.name().to_string(),
                    source,
                })
            }
        };
        if let Err(source) = state.apply(mv, player) {
            return Err(ArenaError::IllegalMove {
                agent: agent.name().to_string(),
                player,
                mv,
                source,
            });
        }
        moves.push(mv);
    }

    Ok(GameRecord {
        winner: state.check_winner(),
        moves,
        final_state: state,
    })
}

/// Play `config.games` games of `agent` against `opponent`.
pub fn play_match(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    config: &ArenaConfig,
) -> Result<MatchSummary, ArenaError> {
    let mut summary = MatchSummary::new();

    for game in 0..config.games {
        let seat = if config.alternate_seats && game % 2 == 1 {
            Player::One
        } else {
            Player::Zero
        };
        let record = match seat {
            Player::Zero => play_game(&mut *agent, &mut *opponent, config.max_turns)?,
            Player::One => play_game(&mut *opponent, &mut *agent, config.max_turns)?,
        };

        let outcome = match record.winner {
            Some(w) if w == seat => MatchOutcome::Win,
            Some(_) => MatchOutcome::Loss,
            None => MatchOutcome::Draw,
        };
        summary.record(outcome, record.turns());

        info!(
            game = game + 1,
            seat = seat.id(),
            ?outcome,
            turns = record.turns(),
            win_rate = summary.win_rate(),
            "game finished"
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MinimaxAgent, RandomAgent};
    use crate::error::SearchError;
    use crate::game::{Direction, Position};

    /// Always tries to move an interior cell.
    struct StubbornAgent;

    impl Agent for StubbornAgent {
        fn make_move(&mut self, _state: &GameState) -> Result<Move, SearchError> {
            Ok(Move::new(Position::new(2, 2), Direction::Top))
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    #[test]
    fn test_random_game_finishes() {
        let mut a = RandomAgent::with_seed(1);
        let mut b = RandomAgent::with_seed(2);
        let record = play_game(&mut a, &mut b, 2_000).unwrap();
        assert!(record.winner.is_some());
        assert_eq!(record.final_state.check_winner(), record.winner);
        assert!(record.turns() > 0);
    }

    #[test]
    fn test_turn_cap_is_a_draw() {
        let mut a = RandomAgent::with_seed(1);
        let mut b = RandomAgent::with_seed(2);
        let record = play_game(&mut a, &mut b, 3).unwrap();
        assert_eq!(record.turns(), 3);
        assert_eq!(record.winner, None);
    }

    #[test]
    fn test_illegal_move_aborts_game() {
        let mut a = StubbornAgent;
        let mut b = RandomAgent::with_seed(2);
        let err = play_game(&mut a, &mut b, 10).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::IllegalMove {
                player: Player::Zero,
                ..
            }
        ));
    }

    /// Plays like `RandomAgent` but remembers which seat it was asked to move for.
    struct SeatRecorder {
        inner: RandomAgent,
        seats: Vec<Player>,
    }

    impl Agent for SeatRecorder {
        fn make_move(&mut self, state: &GameState) -> Result<Move, SearchError> {
            self.seats.push(state.current_player());
            self.inner.make_move(state)
        }

        fn name(&self) -> &str {
            "Recorder"
        }
    }

    #[test]
    fn test_fixed_seat_keeps_agent_first() {
        let mut agent = SeatRecorder {
            inner: RandomAgent::with_seed(3),
            seats: Vec::new(),
        };
        let mut opponent = RandomAgent::with_seed(4);
        let config = ArenaConfig {
            games: 2,
            max_turns: 2,
            alternate_seats: false,
            seed: Some(3),
        };
        let summary = play_match(&mut agent, &mut opponent, &config).unwrap();
        assert_eq!(summary.games(), 2);
        assert_eq!(agent.seats, vec![Player::Zero, Player::Zero]);
    }

    #[test]
    fn test_alternating_seats_swap_each_game() {
        let mut agent = SeatRecorder {
            inner: RandomAgent::with_seed(3),
            seats: Vec::new(),
        };
        let mut opponent = RandomAgent::with_seed(4);
        let config = ArenaConfig {
            games: 2,
            max_turns: 2,
            alternate_seats: true,
            seed: Some(3),
        };
        play_match(&mut agent, &mut opponent, &config).unwrap();
        assert_eq!(agent.seats, vec![Player::Zero, Player::One]);
    }

    #[test]
    fn test_match_alternates_seats() {
        let mut minimax = MinimaxAgent::new(1);
        let mut random = RandomAgent::with_seed(8);
        let config = ArenaConfig {
            games: 4,
            max_turns: 200,
            alternate_seats: true,
            seed: Some(8),
        };
        let summary = play_match(&mut minimax, &mut random, &config).unwrap();
        assert_eq!(summary.games(), 4);
        assert!(summary.wins >= 3, "{summary:?}");
    }
}
