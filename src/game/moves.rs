use std::fmt;

use super::board::SIZE;

/// A board coordinate. `x` is the column and `y` the row; `(0, 0)` is the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(self) -> bool {
        self.x < SIZE && self.y < SIZE
    }

    /// True for the 16 cells of the outer ring.
    pub fn is_border(self) -> bool {
        self.in_bounds() && (self.x == 0 || self.y == 0 || self.x == SIZE - 1 || self.y == SIZE - 1)
    }

    pub fn is_corner(self) -> bool {
        self.in_bounds()
            && (self.x == 0 || self.x == SIZE - 1)
            && (self.y == 0 || self.y == SIZE - 1)
    }
}

/// Side of the board the picked piece is pushed back in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used by move generation.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    pub fn letter(self) -> char {
        match self {
            Direction::Top => 'T',
            Direction::Bottom => 'B',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'T' => Some(Direction::Top),
            'B' => Some(Direction::Bottom),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    /// A piece already on this side of the board cannot be re-inserted from it.
    pub fn is_valid_from(self, from: Position) -> bool {
        match self {
            Direction::Top => from.y != 0,
            Direction::Bottom => from.y != SIZE - 1,
            Direction::Left => from.x != 0,
            Direction::Right => from.x != SIZE - 1,
        }
    }
}

/// Pick the piece at `from` and push it back in from `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Position,
    pub direction: Direction,
}

impl Move {
    pub const fn new(from: Position, direction: Direction) -> Self {
        Move { from, direction }
    }
}

impl fmt::Display for Move {
    /// Same `<x>-<y>-<D>` form the human input adapter accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.from.x, self.from.y, self.direction.letter())
    }
}
