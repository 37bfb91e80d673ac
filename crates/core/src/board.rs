//! Board module - manages the game grid
//!
//! The board is a `width x height` grid of occupancy counts stored as a flat,
//! row-major vector. A count of 0 is an empty cell, anything above is filled.
//! Coordinates: (row, col) where row 0 is the top and col 0 the left edge.
//!
//! Every operation that changes cells returns a new `Board`; the receiver is
//! never touched, so a board handed to the renderer stays valid after the
//! game has moved on.

use thiserror::Error;

use crate::piece::Piece;
use crate::types::{Location, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// Which full rows a clear removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Only the run of full rows touching the bottom edge; stops at the first gap
    #[default]
    ContiguousFromBottom,
    /// Every full row, wherever it sits
    AllFull,
}

impl ClearPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "contiguous" | "bottom" => Some(ClearPolicy::ContiguousFromBottom),
            "all" | "classic" => Some(ClearPolicy::AllFull),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearPolicy::ContiguousFromBottom => "contiguous",
            ClearPolicy::AllFull => "all",
        }
    }
}

/// The game board - occupancy counts in a flat row-major vector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<u8>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    /// Create a board from explicit rows (top row first)
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut board = Self::new(width, height)?;
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    got: cells.len(),
                    expected: width,
                });
            }
            board.row_mut(row).copy_from_slice(cells);
        }
        Ok(board)
    }

    /// Calculate flat index from a location
    #[inline(always)]
    fn index(&self, loc: Location) -> Option<usize> {
        let row = usize::try_from(loc.row).ok()?;
        let col = usize::try_from(loc.col).ok()?;
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at a location
    /// Returns None if out of bounds
    pub fn get(&self, loc: Location) -> Option<u8> {
        self.index(loc).map(|idx| self.cells[idx])
    }

    /// Check if location is occupied (within bounds and filled)
    pub fn is_occupied(&self, loc: Location) -> bool {
        matches!(self.get(loc), Some(n) if n > 0)
    }

    /// Check if every cell the piece covers is in bounds and empty
    ///
    /// Bounds are checked before occupancy for each cell; the scan stops at
    /// the first violation.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .locations()
            .iter()
            .all(|&loc| matches!(self.get(loc), Some(0)))
    }

    /// Copy of this board with every cell of `piece` incremented by one
    ///
    /// This is a structural merge: it does not check `can_place`, so it can
    /// produce counts above 1 where the piece overlaps. Cells of the piece
    /// that fall outside the grid have nothing to increment and are skipped.
    pub fn with_piece(&self, piece: &Piece) -> Board {
        let mut next = self.clone();
        for loc in piece.locations() {
            if let Some(idx) = self.index(loc) {
                next.cells[idx] = next.cells[idx].saturating_add(1);
            }
        }
        next
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&c| c > 0))
    }

    /// Clear the contiguous run of full rows at the bottom of the board
    ///
    /// Scans upward from the bottom row and stops at the first row that is
    /// not full; full rows above that gap stay. Returns the compacted board and
    /// the number of rows removed.
    pub fn clear(&self) -> (Board, usize) {
        self.clear_with(ClearPolicy::ContiguousFromBottom)
    }

    /// Clear full rows according to `policy`
    pub fn clear_with(&self, policy: ClearPolicy) -> (Board, usize) {
        match policy {
            ClearPolicy::ContiguousFromBottom => {
                let cleared = (0..self.height)
                    .rev()
                    .take_while(|&row| self.is_row_full(row))
                    .count();
                (self.drop_bottom_rows(cleared), cleared)
            }
            ClearPolicy::AllFull => self.compact_full_rows(),
        }
    }

    /// Remove the bottom `n` rows, shifting everything above down by `n`
    fn drop_bottom_rows(&self, n: usize) -> Board {
        let mut next = self.clone();
        if n == 0 {
            return next;
        }
        let kept = (self.height - n) * self.width;
        let shift = n * self.width;
        next.cells.copy_within(0..kept, shift);
        next.cells[..shift].fill(0);
        next
    }

    /// Two-pointer compaction that removes every full row
    fn compact_full_rows(&self) -> (Board, usize) {
        let mut next = self.clone();
        let width = self.width;
        let mut write_row = self.height;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    next.cells[write_row * width..(write_row + 1) * width]
                        .copy_from_slice(&self.cells[src..src + width]);
                }
            }
        }

        // Clear the remaining rows at the top
        next.cells[..write_row * width].fill(0);
        (next, cleared)
    }

    /// Cells of one row, left to right; `None` past the bottom row
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cells: vec![0; DEFAULT_BOARD_WIDTH * DEFAULT_BOARD_HEIGHT],
        }
    }
}
