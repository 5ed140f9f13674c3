//! Board state and the sliding-merge move algorithm.
//!
//! A move slides every tile as far as it will go in one direction and
//! merges equal neighbours once. [`Board::shift`] is a pure function
//! returning a fresh board together with the score gained and the cells
//! that received a merge, so callers can keep old snapshots around
//! without aliasing surprises.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::cellset::CellSet;
use crate::common::{BoardError, Tile};
use crate::config::{SPAWN_HIGH, SPAWN_LOW, SPAWN_TWO_PROBABILITY};

/// Direction a move slides the tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order the terminal check probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Outcome of sliding a board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResult {
    /// Board after the slide; equal to the input when nothing moved.
    pub board: Board,
    /// Sum of every tile value created by a merge during this move.
    pub score_delta: u32,
    /// Cells holding a merged tile, keyed by their final (row, col).
    pub merged: CellSet,
}

/// Outcome of spawning a random tile on a board with room left.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Spawn {
    /// Board with the new tile added.
    pub board: Board,
    /// Where the tile landed.
    pub position: (usize, usize),
    /// Value of the new tile, 2 or 4.
    pub value: Tile,
}

/// A square merge-puzzle board, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Create an empty board of `size`×`size` cells.
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }
        let len = size.checked_mul(size).ok_or(BoardError::InvalidSize)?;
        Ok(Board {
            size,
            cells: vec![0; len],
        })
    }

    /// Build a board from rows of cell values. Rows must form a square.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            if line.len() != size {
                return Err(BoardError::InvalidShape {
                    expected: size,
                    row,
                    len: line.len(),
                });
            }
            cells.extend_from_slice(line);
        }
        Ok(Board { size, cells })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Tile, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(self.cells[row * self.size + col])
    }

    /// Iterator over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Iterator over every cell value in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().copied()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&t| t == 0).count()
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Largest tile on the board, `0` when the board is empty.
    pub fn highest_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(0)
    }

    /// Same-size board with every cell empty.
    pub fn cleared(&self) -> Board {
        Board {
            size: self.size,
            cells: vec![0; self.cells.len()],
        }
    }

    /// Validate that the declared size and the cell buffer agree.
    ///
    /// Boards built through [`Board::empty`] or [`Board::from_rows`] always
    /// pass; call this after deserializing a board from untrusted input.
    pub fn check_shape(&self) -> Result<(), BoardError> {
        if self.size == 0 {
            return Err(BoardError::InvalidSize);
        }
        let len = self.size.checked_mul(self.size).ok_or(BoardError::InvalidSize)?;
        if self.cells.len() != len {
            return Err(BoardError::InvalidCellCount {
                expected: len,
                got: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Strict validation: every cell must be empty or a power of two >= 2.
    ///
    /// Movement never requires this; it is an opt-in check for callers
    /// that construct boards from external data.
    pub fn check_tiles(&self) -> Result<(), BoardError> {
        for (i, &value) in self.cells.iter().enumerate() {
            if value != 0 && (value < 2 || !value.is_power_of_two()) {
                return Err(BoardError::InvalidTile {
                    row: i / self.size,
                    col: i % self.size,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Slide all tiles in `direction`, merging equal neighbours once.
    ///
    /// Pure: the input board is untouched. The result board equals the
    /// input when no tile can move or merge; callers decide legality by
    /// comparing the two.
    pub fn shift(&self, direction: Direction) -> MoveResult {
        let n = self.size;
        let mut board = self.clone();
        let mut merged = CellSet::new(n);
        let mut score_delta = 0u32;
        let mut lane = Vec::with_capacity(n);

        for lane_idx in 0..n {
            // extract in traversal order: reversed for right/down so the
            // merge pass always resolves toward the leading edge
            lane.clear();
            for i in 0..n {
                let (r, c) = lane_cell(direction, n, lane_idx, i);
                lane.push(self.cells[r * n + c]);
            }
            let (gained, merges) = merge_lane(&mut lane, n);
            score_delta += gained;
            for (i, &tile) in lane.iter().enumerate() {
                let (r, c) = lane_cell(direction, n, lane_idx, i);
                board.cells[r * n + c] = tile;
            }
            for &i in &merges {
                let (r, c) = lane_cell(direction, n, lane_idx, i);
                let _ = merged.insert(r, c);
            }
        }

        MoveResult {
            board,
            score_delta,
            merged,
        }
    }

    /// Returns true when sliding in `direction` would change the board.
    pub fn can_shift(&self, direction: Direction) -> bool {
        self.shift(direction).board != *self
    }

    /// Returns true iff no direction produces any change.
    ///
    /// Recomputes all four moves; at O(4 × area) this needs no caching.
    pub fn is_game_over(&self) -> bool {
        Direction::ALL.iter().all(|&d| !self.can_shift(d))
    }

    /// Copy of the board with one random tile added on an empty cell.
    ///
    /// The cell is chosen uniformly among empty cells; the value is 2
    /// with probability 0.9, otherwise 4. Returns `None` when the board
    /// is full. This is the only way new value enters a game.
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Spawn> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == 0)
            .map(|(i, _)| i)
            .collect();
        if empty.is_empty() {
            return None;
        }
        let idx = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_bool(SPAWN_TWO_PROBABILITY) {
            SPAWN_LOW
        } else {
            SPAWN_HIGH
        };
        let mut board = self.clone();
        board.cells[idx] = value;
        Some(Spawn {
            board,
            position: (idx / self.size, idx % self.size),
            value,
        })
    }
}

/// Board coordinates of the `i`-th cell along a lane, counting from the
/// edge the tiles slide toward.
#[inline]
fn lane_cell(direction: Direction, size: usize, lane: usize, i: usize) -> (usize, usize) {
    match direction {
        Direction::Left => (lane, i),
        Direction::Right => (lane, size - 1 - i),
        Direction::Up => (i, lane),
        Direction::Down => (size - 1 - i, lane),
    }
}

/// Slide one extracted lane toward index 0: drop empties, merge equal
/// neighbours in a single pass, pad back to length `n`.
///
/// The scan advances past each merge result, so a tile created by a
/// merge is never merged again within the same move. Returns the score
/// gained and the lane indices that received a merge.
fn merge_lane(lane: &mut Vec<Tile>, n: usize) -> (u32, Vec<usize>) {
    lane.retain(|&t| t != 0);
    let mut gained = 0u32;
    let mut merges = Vec::new();
    let mut i = 0;
    while i + 1 < lane.len() {
        if lane[i] == lane[i + 1] {
            lane[i] *= 2;
            gained += lane[i];
            merges.push(i);
            lane.remove(i + 1);
        }
        i += 1;
    }
    lane.resize(n, 0);
    (gained, merges)
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({}x{}) {:?}", self.size, self.size, self.cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.tiles().map(decimal_width).max().unwrap_or(1).max(4);
        for row in self.rows() {
            rule(f, self.size, width)?;
            write!(f, "|")?;
            for &t in row {
                if t == 0 {
                    write!(f, "{:>width$}|", "", width = width)?;
                } else {
                    write!(f, "{:>width$}|", t, width = width)?;
                }
            }
            writeln!(f)?;
        }
        rule(f, self.size, width)
    }
}

fn rule(f: &mut fmt::Formatter<'_>, size: usize, width: usize) -> fmt::Result {
    write!(f, "+")?;
    for _ in 0..size {
        for _ in 0..width {
            write!(f, "-")?;
        }
        write!(f, "+")?;
    }
    writeln!(f)
}

fn decimal_width(mut v: Tile) -> usize {
    let mut w = 1;
    while v >= 10 {
        v /= 10;
        w += 1;
    }
    w
}
