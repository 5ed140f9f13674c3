//! A dynamically sized set of board cells backed by a bit mask.
//!
//! The type is `no_std` friendly. Cells of an `N×N` grid are packed into
//! 64-bit words in row-major order, so membership tests and iteration stay
//! cheap even for large boards. Used by the engine to report which cells
//! received a merge during a move.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

const WORD_BITS: usize = 64;

/// Errors returned by cell set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSetError {
    /// Row or column index is out of bounds [0..size).
    OutOfBounds { row: usize, col: usize },
}

impl core::fmt::Display for CellSetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellSetError::OutOfBounds { row, col } => {
                write!(f, "OutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A set of `(row, col)` cells on an `size×size` grid, stored as a bit mask.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSet {
    size: usize,
    words: Vec<u64>,
}

impl CellSet {
    /// Create a new empty set for a `size×size` grid.
    pub fn new(size: usize) -> Self {
        let bits = size * size;
        CellSet {
            size,
            words: vec![0; bits.div_ceil(WORD_BITS)],
        }
    }

    /// Grid side length the set was created for.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of cells in the set.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are in the set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns whether `(row, col)` is in the set.
    pub fn contains(&self, row: usize, col: usize) -> Result<bool, CellSetError> {
        self.check_bounds(row, col)?;
        let idx = row * self.size + col;
        Ok((self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 != 0)
    }

    /// Adds `(row, col)` to the set.
    pub fn insert(&mut self, row: usize, col: usize) -> Result<(), CellSetError> {
        self.check_bounds(row, col)?;
        let idx = row * self.size + col;
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
        Ok(())
    }

    /// Removes `(row, col)` from the set.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<(), CellSetError> {
        self.check_bounds(row, col)?;
        let idx = row * self.size + col;
        self.words[idx / WORD_BITS] &= !(1u64 << (idx % WORD_BITS));
        Ok(())
    }

    /// Removes every cell from the set.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in &mut self.words {
            *w = 0;
        }
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), CellSetError> {
        if row >= self.size || col >= self.size {
            Err(CellSetError::OutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Creates a set from an iterator over `(row, col)` positions.
    pub fn from_positions<I>(size: usize, iter: I) -> Result<Self, CellSetError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut set = Self::new(size);
        for (r, c) in iter {
            set.insert(r, c)?;
        }
        Ok(set)
    }

    /// Iterator over the cells of the set in row-major order.
    #[inline]
    pub fn iter(&self) -> SetCells<'_> {
        SetCells { set: self, idx: 0 }
    }

    #[inline]
    fn bit(&self, idx: usize) -> bool {
        (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 != 0
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet({}x{}):", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.bit(r * self.size + c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.bit(r * self.size + c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the cells of a [`CellSet`].
#[derive(Clone, Copy)]
pub struct SetCells<'a> {
    set: &'a CellSet,
    idx: usize,
}

impl<'a> Iterator for SetCells<'a> {
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.set.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if self.set.bit(idx) {
                return Some((idx / n, idx % n));
            }
        }
        None
    }
}
