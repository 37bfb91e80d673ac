//! Shapes module - the spawn table of tetromino offsets
//!
//! Offsets are `(row, col)` inside the 4x4 bounding box. The O square sits in
//! the centre of the box so that clockwise box rotation maps it onto itself.

use crate::piece::Piece;
use crate::types::{Location, Offset, ShapeKind, BLOCK_DIMENSION};

/// Shape of a tetromino - 4 offsets from the piece anchor
pub type ShapeOffsets = [Offset; 4];

const fn o(row: i32, col: i32) -> Offset {
    Offset::new(row, col)
}

/// Get the spawn offsets for a shape kind
pub fn shape_offsets(kind: ShapeKind) -> ShapeOffsets {
    match kind {
        // Vertical bar down the left column of the box
        ShapeKind::I => [o(0, 0), o(1, 0), o(2, 0), o(3, 0)],
        ShapeKind::O => [o(1, 1), o(1, 2), o(2, 1), o(2, 2)],
        ShapeKind::T => [o(0, 0), o(0, 1), o(0, 2), o(1, 1)],
        ShapeKind::S => [o(0, 1), o(0, 2), o(1, 0), o(1, 1)],
        ShapeKind::Z => [o(0, 0), o(0, 1), o(1, 1), o(1, 2)],
        ShapeKind::J => [o(0, 0), o(1, 0), o(1, 1), o(1, 2)],
        ShapeKind::L => [o(0, 2), o(1, 0), o(1, 1), o(1, 2)],
    }
}

/// Spawn anchor for a board `width` columns wide: top row, box centred
pub fn spawn_location(width: usize) -> Location {
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    Location::new(0, width.saturating_sub(BLOCK_DIMENSION).max(0) / 2)
}

/// Build a fresh piece of `kind` at the spawn anchor
pub fn spawn_piece(kind: ShapeKind, width: usize) -> Piece {
    Piece::from_shape(shape_offsets(kind), spawn_location(width))
}
