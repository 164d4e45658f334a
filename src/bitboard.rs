//! A runtime-sized bitboard keyed by [`Coord`].
//!
//! Boards are `size×size` grids packed row-major into `u64` words. The type is
//! `no_std` friendly (it only needs `alloc`). It backs the hit and miss sets
//! of a [`Board`](crate::Board) and the AI's known-water set.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use crate::common::{BoardError, Coord};

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-size N×N bit set.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitBoard {
    size: usize,
    words: Vec<u64>,
}

impl BitBoard {
    /// Create a new empty bitboard for a `size×size` grid.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        BitBoard {
            size,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Whether `coord` is set. Out-of-range coordinates are never set.
    pub fn contains(&self, coord: Coord) -> bool {
        match self.index(coord) {
            Some(idx) => (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1,
            None => false,
        }
    }

    /// Sets `coord`. Returns `true` if it was not already set.
    pub fn insert(&mut self, coord: Coord) -> Result<bool, BoardError> {
        let idx = self.checked_index(coord)?;
        let word = &mut self.words[idx / WORD_BITS];
        let bit = 1u64 << (idx % WORD_BITS);
        let fresh = *word & bit == 0;
        *word |= bit;
        Ok(fresh)
    }

    /// Clears `coord`. Returns `true` if it was set.
    pub fn remove(&mut self, coord: Coord) -> Result<bool, BoardError> {
        let idx = self.checked_index(coord)?;
        let word = &mut self.words[idx / WORD_BITS];
        let bit = 1u64 << (idx % WORD_BITS);
        let was_set = *word & bit != 0;
        *word &= !bit;
        Ok(was_set)
    }

    /// Clears all bits.
    pub fn clear_all(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter(&self) -> SetBits<'_> {
        SetBits { board: self, idx: 0 }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.size && coord.col < self.size {
            Some(coord.row * self.size + coord.col)
        } else {
            None
        }
    }

    #[inline]
    fn checked_index(&self, coord: Coord) -> Result<usize, BoardError> {
        self.index(coord).ok_or(BoardError::OutOfBounds {
            row: coord.row,
            col: coord.col,
        })
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.contains(Coord::new(r, c)) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a> {
    board: &'a BitBoard,
    idx: usize,
}

impl Iterator for SetBits<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if (self.board.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1 {
                return Some(Coord::new(idx / n, idx % n));
            }
        }
        None
    }
}

/// Union of two boards. Both sides must share a size.
impl BitOr for &BitBoard {
    type Output = BitBoard;

    fn bitor(self, rhs: Self) -> BitBoard {
        debug_assert_eq!(self.size, rhs.size);
        let mut out = self.clone();
        for (w, r) in out.words.iter_mut().zip(rhs.words.iter()) {
            *w |= *r;
        }
        out
    }
}
