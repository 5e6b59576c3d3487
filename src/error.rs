//! Error type shared by cards, estimators, the layout search and plotting

/// Everything that can go wrong while building cards or running simulations over them
#[derive(Debug, thiserror::Error)]
pub enum LingoError {

    /// A card needs at least one cell
    #[error("card must have a dimension of at least 1")]
    EmptyCard,

    /// Every row of a card must be as long as the card is tall
    #[error("card is not square: row {row} has {len} cells, expected {dim}")]
    NotSquare { row: usize, len: usize, dim: usize },

    /// Cells are either 1 (open) or 0 (marked)
    #[error("invalid cell value {value} at ({row}, {col}), expected 0 (marked) or 1 (open)")]
    InvalidCell { row: usize, col: usize, value: u8 },

    /// Crossed-off cells are flat row-major indices below `dim * dim`
    #[error("cell index {index} is out of range for a {dim}x{dim} card")]
    IndexOutOfRange { index: usize, dim: usize },

    /// A cell can only be crossed off once
    #[error("cell index {index} is marked more than once")]
    DuplicateIndex { index: usize },

    /// The text form of a card could not be read
    #[error("failed to parse card: {0}")]
    Parse(String),

    /// Coupled simulations need two cards of the same size
    #[error("dimensions do not agree: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Coupled simulations share draw positions, so both cards need the same number of open cells
    #[error("open cell counts do not agree: {left} != {right}")]
    OpenCountMismatch { left: usize, right: usize },

    /// Tallies from separate runs can only be merged when they cover the same number of open cells
    #[error("tally lengths do not agree: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// An estimate needs at least one simulated finale
    #[error("trial count must be at least 1")]
    NoTrials,

    /// The reference of a search must have one entry per open cell of the candidates
    #[error("reference CDF has {actual} entries, expected {expected} for a {dim}x{dim} search")]
    ReferenceLength { actual: usize, expected: usize, dim: usize },

    /// Layout searches need a card of at least 2x2
    #[error("layout search needs a dimension of at least 2, got {0}")]
    SearchDimension(usize),

    /// The plotting backend reported an error
    #[error("plotting failed: {0}")]
    Plot(String),

}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LingoError>;
