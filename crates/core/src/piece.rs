//! Piece module - offset-based shapes with pure rotation and translation
//!
//! A piece is a fixed set of cell offsets measured from an anchor location.
//! Offsets live inside a `BLOCK_DIMENSION x BLOCK_DIMENSION` box; rotation is a
//! transform on that box, so off-centre shapes shift inside it as they turn.
//! Nothing here ever mutates a piece: every operation returns a new one.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Location, Offset, BLOCK_DIMENSION, MAX_PIECE_CELLS};

/// Offsets of a single piece, stack-allocated
pub type Offsets = ArrayVec<Offset, MAX_PIECE_CELLS>;

/// Absolute cells of a single piece, in offset order
pub type Locations = ArrayVec<Location, MAX_PIECE_CELLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("a piece needs at least one offset")]
    Empty,
    #[error("a piece holds at most {max} offsets, got {got}")]
    TooManyOffsets { got: usize, max: usize },
}

/// An immutable shape placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    offsets: Offsets,
    anchor: Location,
}

impl Piece {
    /// Build a piece from its offsets and anchor
    pub fn new(offsets: &[Offset], anchor: Location) -> Result<Self, PieceError> {
        if offsets.is_empty() {
            return Err(PieceError::Empty);
        }
        let offsets = Offsets::try_from(offsets).map_err(|_| PieceError::TooManyOffsets {
            got: offsets.len(),
            max: MAX_PIECE_CELLS,
        })?;
        Ok(Self { offsets, anchor })
    }

    /// Build a piece from a fixed-size shape table entry
    pub(crate) fn from_shape(offsets: [Offset; 4], anchor: Location) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
            anchor,
        }
    }

    /// Build a piece anchored at the grid origin
    pub fn at_origin(offsets: &[Offset]) -> Result<Self, PieceError> {
        Self::new(offsets, Location::ORIGIN)
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn anchor(&self) -> Location {
        self.anchor
    }

    /// Rotate 90° clockwise about the bounding box: `(row, col) -> (col, D-1-row)`
    ///
    /// The anchor stays put, so four rotations always return to the original cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Piece;
    /// use blockfall_core::types::{Location, Offset};
    ///
    /// let bar = Piece::at_origin(&[
    ///     Offset::new(0, 0),
    ///     Offset::new(1, 0),
    ///     Offset::new(2, 0),
    ///     Offset::new(3, 0),
    /// ])
    /// .unwrap();
    ///
    /// let turned = bar.rotate();
    /// assert_eq!(
    ///     turned.locations().as_slice(),
    ///     &[
    ///         Location::new(0, 3),
    ///         Location::new(0, 2),
    ///         Location::new(0, 1),
    ///         Location::new(0, 0),
    ///     ]
    /// );
    /// ```
    pub fn rotate(&self) -> Piece {
        let offsets = self
            .offsets
            .iter()
            .map(|o| Offset::new(o.col, BLOCK_DIMENSION - 1 - o.row))
            .collect();
        Piece {
            offsets,
            anchor: self.anchor,
        }
    }

    /// Shift the anchor by `offset`; the shape itself is untouched
    pub fn translate(&self, offset: Offset) -> Piece {
        Piece {
            offsets: self.offsets.clone(),
            anchor: self.anchor + offset,
        }
    }

    /// Absolute cells covered by the piece, one per offset, in offset order
    pub fn locations(&self) -> Locations {
        self.offsets.iter().map(|&o| self.anchor + o).collect()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false; construction rejects empty offset sets
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
