//! Defines Lingo cards, which are square grids of cells that are either still open or already marked
//!
//! Cards are stored row-major, so a cell at `(row, col)` has the flat index `row * dim + col`. Flat indices are what the draw sequences, marked-layout lists, and searches all work with.
//!
//! The text form of a card is its rows of `1` (open) and `0` (marked), separated by `/`, so the standard card reads `10101/11001/10101/11110/01101`.
//!

use core::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{LingoError, Result};

pub mod line;

pub use line::Line;

/// The state of a single cell on a card
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Cell {

    /// Not drawn yet
    Open,

    /// Crossed off, either before the finale or by a draw
    Marked,

}

impl Cell {

    /// Convert from the 0/1 encoding, where 1 is open and 0 is marked
    pub const fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            1 => Some(Self::Open),
            0 => Some(Self::Marked),
            _ => None,
        }
    }

    pub const fn to_bit(self) -> u8 {
        match self {
            Self::Open => 1,
            Self::Marked => 0,
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A square Lingo card of side length `dim`
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {

    /// Side length of the card
    dim: usize,

    /// All cells, in row-major order
    cells: Vec<Cell>,

}

impl Card {

    /// Create a card with every cell open
    pub fn open(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(LingoError::EmptyCard);
        }
        Ok(Self { dim, cells: vec![Cell::Open; dim * dim] })
    }

    /// Create a card where exactly the given flat indices are marked, and everything else is open
    pub fn from_marked(dim: usize, marked: &[usize]) -> Result<Self> {
        let mut card = Self::open(dim)?;
        for &index in marked {
            if index >= card.cells.len() {
                return Err(LingoError::IndexOutOfRange { index, dim });
            }
            if !card.cells[index].is_open() {
                return Err(LingoError::DuplicateIndex { index });
            }
            card.cells[index] = Cell::Marked;
        }
        Ok(card)
    }

    /// Create a card from rows of 0/1 values, where 1 is open and 0 is marked
    pub fn from_rows<T: AsRef<[u8]>>(rows: &[T]) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(LingoError::EmptyCard);
        }

        let mut cells = Vec::with_capacity(dim * dim);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(LingoError::NotSquare { row, len: values.len(), dim });
            }
            for (col, &value) in values.iter().enumerate() {
                let cell = Cell::from_bit(value).ok_or(LingoError::InvalidCell { row, col, value })?;
                cells.push(cell);
            }
        }
        Ok(Self { dim, cells })
    }

    pub const fn dim(&self) -> usize {
        self.dim
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of the cell at `(row, col)`
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.dim + col
    }

    /// Position `(row, col)` of a flat index
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.dim, index % self.dim)
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Flat indices of all open cells, in increasing order
    pub fn open_cells(&self) -> Vec<usize> {
        self.cells.iter().positions(|c| c.is_open()).collect()
    }

    /// Flat indices of all marked cells, in increasing order
    pub fn marked_cells(&self) -> Vec<usize> {
        self.cells.iter().positions(|c| !c.is_open()).collect()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Cross off the cell at a flat index (marking an already marked cell does nothing)
    pub fn mark(&mut self, index: usize) {
        self.cells[index] = Cell::Marked;
    }

    /// Overwrite this card with `other`, keeping the existing allocation
    pub fn copy_from(&mut self, other: &Card) {
        self.dim = other.dim;
        self.cells.clone_from(&other.cells);
    }

    /// Iterate over the rows of the card as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dim)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for cell in row {
                write!(f, "{}", cell.to_bit())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card(\"{}\")", self)
    }
}

impl FromStr for Card {
    type Err = LingoError;

    /// Parse rows of `0`/`1` characters, separated by `/`, `,`, or whitespace
    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .split(|c: char| c == '/' || c == ',' || c.is_whitespace())
            .filter(|row| !row.is_empty())
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '1' => Ok(1u8),
                        '0' => Ok(0u8),
                        _ => Err(LingoError::Parse(format!("unexpected character '{c}' in row '{row}'"))),
                    })
                    .collect::<Result<Vec<u8>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&rows)
    }
}
