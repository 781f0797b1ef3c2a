use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Zero,
    One,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Zero, Player::One];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Zero => Cell::Zero,
            Player::One => Cell::One,
        }
    }

    /// Numeric id (0 or 1), also the glyph used on the printed board.
    pub fn id(self) -> usize {
        match self {
            Player::Zero => 0,
            Player::One => 1,
        }
    }

    pub fn from_id(id: usize) -> Option<Player> {
        match id {
            0 => Some(Player::Zero),
            1 => Some(Player::One),
            _ => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Zero => "Player 0",
            Player::One => "Player 1",
        }
    }
}
