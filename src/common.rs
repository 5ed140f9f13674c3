//! Common types for the merge puzzle: tile values and board errors.

/// Value held by one cell: `0` for empty, otherwise a power of two from 2 up.
pub type Tile = u32;

/// Errors returned by Board operations.
#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {
    /// Board size must be at least 1.
    InvalidSize,
    /// Input rows do not form a square grid.
    InvalidShape { expected: usize, row: usize, len: usize },
    /// Cell buffer length does not match the declared board size.
    InvalidCellCount { expected: usize, got: usize },
    /// A cell holds a value that is neither empty nor a power of two >= 2.
    InvalidTile { row: usize, col: usize, value: Tile },
    /// Row or column index is out of range.
    OutOfBounds { row: usize, col: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidSize => write!(f, "board size must be at least 1"),
            BoardError::InvalidShape { expected, row, len } => write!(
                f,
                "row {} has {} cells, expected {} for a square board",
                row, len, expected
            ),
            BoardError::InvalidCellCount { expected, got } => write!(
                f,
                "cell buffer holds {} values, expected {}",
                got, expected
            ),
            BoardError::InvalidTile { row, col, value } => write!(
                f,
                "cell ({}, {}) holds {}, which is not a power of two",
                row, col, value
            ),
            BoardError::OutOfBounds { row, col } => {
                write!(f, "position ({}, {}) is out of range", row, col)
            }
        }
    }
}
