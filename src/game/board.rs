use std::fmt;
use std::str::FromStr;

use super::moves::{Direction, Position};
use super::state::MoveError;

pub const SIZE: usize = 5;

/// Rows, columns and both diagonals.
pub const LINE_COUNT: usize = 2 * SIZE + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Zero,
    One,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Zero => '0',
            Cell::One => '1',
        }
    }

    fn from_glyph(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            '0' => Some(Cell::Zero),
            '1' => Some(Cell::One),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

/// Error returned when a textual board does not describe a 5x5 grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid board text: {0}")]
pub struct ParseBoardError(String);

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Get the cell at a position. Panics when out of bounds.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.y][pos.x]
    }

    /// Overwrite a single cell, bypassing the push rules. Used to build
    /// synthetic positions.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.y][pos.x] = cell;
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    pub fn count_empty(&self) -> usize {
        self.count(Cell::Empty)
    }

    /// Remove the piece at `from`, shift the rest of its row or column one
    /// step toward the hole and drop `cell` into the freed edge slot.
    pub fn push(
        &mut self,
        from: Position,
        direction: Direction,
        cell: Cell,
    ) -> Result<(), MoveError> {
        if !from.in_bounds() {
            return Err(MoveError::OutOfBounds);
        }
        if !from.is_border() {
            return Err(MoveError::NotOnBorder);
        }
        if !direction.is_valid_from(from) {
            return Err(MoveError::InvalidDirection);
        }

        let Position { x, y } = from;
        match direction {
            Direction::Left => {
                for i in (1..=x).rev() {
                    self.cells[y][i] = self.cells[y][i - 1];
                }
                self.cells[y][0] = cell;
            }
            Direction::Right => {
                for i in x..SIZE - 1 {
                    self.cells[y][i] = self.cells[y][i + 1];
                }
                self.cells[y][SIZE - 1] = cell;
            }
            Direction::Top => {
                for i in (1..=y).rev() {
                    self.cells[i][x] = self.cells[i - 1][x];
                }
                self.cells[0][x] = cell;
            }
            Direction::Bottom => {
                for i in y..SIZE - 1 {
                    self.cells[i][x] = self.cells[i + 1][x];
                }
                self.cells[SIZE - 1][x] = cell;
            }
        }

        Ok(())
    }

    /// The contents of every row, column and diagonal.
    pub fn lines(&self) -> [[Cell; SIZE]; LINE_COUNT] {
        let mut lines = [[Cell::Empty; SIZE]; LINE_COUNT];
        for i in 0..SIZE {
            for j in 0..SIZE {
                lines[i][j] = self.cells[i][j];
                lines[SIZE + i][j] = self.cells[j][i];
            }
            lines[2 * SIZE][i] = self.cells[i][i];
            lines[2 * SIZE + 1][i] = self.cells[i][SIZE - 1 - i];
        }
        lines
    }

    /// Check whether `cell` fills at least one complete line.
    pub fn has_line(&self, cell: Cell) -> bool {
        if cell == Cell::Empty {
            return false;
        }
        self.lines()
            .iter()
            .any(|line| line.iter().all(|&c| c == cell))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Accepts 25 cell glyphs (`.`, `0`, `1`) in row-major order; whitespace
    /// and `/` row separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let glyphs: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if glyphs.len() != SIZE * SIZE {
            return Err(ParseBoardError(format!(
                "expected {} cells, found {}",
                SIZE * SIZE,
                glyphs.len()
            )));
        }

        let mut board = Board::new();
        for (i, &c) in glyphs.iter().enumerate() {
            let cell = Cell::from_glyph(c)
                .ok_or_else(|| ParseBoardError(format!("unexpected character '{c}'")))?;
            board.cells[i / SIZE][i % SIZE] = cell;
        }
        Ok(board)
    }
}
