/// Result of one game from the point of view of the agent under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

/// Running tally over a series of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSummary {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    total_turns: usize,
}

impl MatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: MatchOutcome, turns: usize) {
        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Loss => self.losses += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.total_turns += turns;
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f32 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }

    /// Average number of plies per game.
    pub fn average_game_length(&self) -> f32 {
        let n = self.games();
        if n == 0 {
            return 0.0;
        }
        self.total_turns as f32 / n as f32
    }

    fn rate(&self, count: usize) -> f32 {
        let n = self.games();
        if n == 0 {
            return 0.0;
        }
        count as f32 / n as f32
    }
}
