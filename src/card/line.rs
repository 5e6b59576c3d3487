//! Win-condition detection: rows, columns, and both diagonals of a card
//!
//! A line is complete once every cell on it is marked, and a card "has Lingo" once any line is complete.
//! Marking a single cell may complete several lines at once, so callers re-check after every mark instead of tracking which line they are working towards.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Cell};

/// One of the `2 * dim + 2` winning lines of a card
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Line {

    Row(usize),

    Column(usize),

    /// The main diagonal, from the top left to the bottom right
    Diagonal,

    /// The diagonal of the card flipped left-to-right, from the top right to the bottom left
    AntiDiagonal,

}

impl Line {

    /// Iterate over every line of a card with side length `dim`: rows first, then columns, then the two diagonals
    pub fn all(dim: usize) -> impl Iterator<Item = Line> {
        (0..dim)
            .map(Line::Row)
            .chain((0..dim).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Flat indices of the cells on this line
    pub fn cells(self, dim: usize) -> impl Iterator<Item = usize> {
        (0..dim).map(move |i| match self {
            Line::Row(row) => row * dim + i,
            Line::Column(col) => i * dim + col,
            Line::Diagonal => i * dim + i,
            Line::AntiDiagonal => i * dim + (dim - 1 - i),
        })
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row),
            Line::Column(col) => write!(f, "column {}", col),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

impl Card {

    /// Number of cells on the line that are still open
    pub fn open_on(&self, line: Line) -> usize {
        line.cells(self.dim).filter(|&i| self.cells[i] == Cell::Open).count()
    }

    /// Whether every cell on the line is marked
    pub fn is_complete(&self, line: Line) -> bool {
        line.cells(self.dim).all(|i| self.cells[i] == Cell::Marked)
    }

    /// Whether any row, column, or diagonal is complete
    pub fn has_lingo(&self) -> bool {
        Line::all(self.dim).any(|line| self.is_complete(line))
    }

    /// Whether the game goes on, i.e. no line is complete yet
    pub fn no_lingo(&self) -> bool {
        !self.has_lingo()
    }

    /// All complete lines, in the order of [Line::all]
    pub fn completed_lines(&self) -> Vec<Line> {
        Line::all(self.dim).filter(|&line| self.is_complete(line)).collect()
    }

    /// Whether some line is exactly one draw away from completion
    ///
    /// This is a property of a layout before the finale starts, and has nothing to do with [Card::has_lingo].
    pub fn near_lingo(&self) -> bool {
        Line::all(self.dim).any(|line| self.open_on(line) == 1)
    }
}
