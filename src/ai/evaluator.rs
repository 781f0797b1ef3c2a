use crate::game::{Board, Player};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

/// Default heuristic: scores near-complete lines and the piece differential.
pub struct QuixoHeuristic;

impl QuixoHeuristic {
    fn score_line(own: usize, opp: usize) -> f64 {
        let own_score = match own {
            4 => 50.0,
            3 => 10.0,
            _ => 0.0,
        };
        let opp_score = match opp {
            4 => 60.0,
            3 => 10.0,
            _ => 0.0,
        };
        own_score - opp_score
    }
}

impl Heuristic for QuixoHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        let mut score = board.count(own_cell) as f64 - board.count(opp_cell) as f64;

        for line in board.lines() {
            let own = line.iter().filter(|&&c| c == own_cell).count();
            let opp = line.iter().filter(|&&c| c == opp_cell).count();
            score += Self::score_line(own, opp);
        }

        score
    }
}
