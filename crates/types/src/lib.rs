//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the workspace.
//! They are plain data with no game logic, usable from the core rules, the
//! terminal view, the input decoder, and the event journal alike.
//!
//! # Coordinates
//!
//! Every coordinate is `(row, col)`:
//!
//! - **row** grows downward, row 0 is the top of the grid
//! - **col** grows rightward, col 0 is the left edge
//!
//! A [`Location`] addresses a grid cell; an [`Offset`] is relative to a piece
//! anchor. `Location + Offset` yields a `Location`.
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Columns on a default board |
//! | `DEFAULT_BOARD_HEIGHT` | 10 | Rows on a default board |
//! | `BLOCK_DIMENSION` | 4 | Side of the square box piece offsets live in |
//! | `MAX_PIECE_CELLS` | 16 | Distinct cells inside that box |
//! | `DEFAULT_GRAVITY_MS` | 1000 | Interval between synthetic `down` moves |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Location, Move, Offset, ShapeKind};
//!
//! let loc = Location::new(2, 3) + Offset::new(1, -1);
//! assert_eq!(loc, Location::new(3, 2));
//!
//! // The up arrow rotates, so `up` is the rotate symbol.
//! assert_eq!("up".parse::<Move>(), Ok(Move::Rotate));
//! assert!("jump".parse::<Move>().is_err());
//!
//! assert_eq!("o".parse::<ShapeKind>(), Ok(ShapeKind::O));
//! ```

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Board height in cells (10 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 10;

/// Side of the square bounding box piece offsets are defined in
pub const BLOCK_DIMENSION: i32 = 4;

/// Upper bound on the number of cells a piece may occupy
pub const MAX_PIECE_CELLS: usize = (BLOCK_DIMENSION * BLOCK_DIMENSION) as usize;

/// Default interval between gravity-driven `down` moves
pub const DEFAULT_GRAVITY_MS: u64 = 1000;

/// Default capacity of the serialized command channel
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Absolute grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const ORIGIN: Location = Location { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Location {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Coordinate relative to a piece anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Offset {
    pub row: i32,
    pub col: i32,
}

impl Offset {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl Add<Offset> for Location {
    type Output = Location;

    fn add(self, rhs: Offset) -> Location {
        Location::new(self.row + rhs.row, self.col + rhs.col)
    }
}

/// Discrete move commands accepted by the controller
///
/// Human input, the gravity scheduler, and scripted tests all speak this
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    /// Rotate the piece 90° clockwise inside its bounding box
    Rotate,
    /// Shift the piece one column left
    Left,
    /// Shift the piece one column right
    Right,
    /// Shift the piece one row down, locking it when blocked
    Down,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Rotate, Move::Left, Move::Right, Move::Down];

    /// Translation applied by this move, `None` for rotation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Move, Offset};
    ///
    /// assert_eq!(Move::Down.offset(), Some(Offset::new(1, 0)));
    /// assert_eq!(Move::Left.offset(), Some(Offset::new(0, -1)));
    /// assert_eq!(Move::Rotate.offset(), None);
    /// ```
    pub fn offset(self) -> Option<Offset> {
        match self {
            Move::Rotate => None,
            Move::Left => Some(Offset::new(0, -1)),
            Move::Right => Some(Offset::new(0, 1)),
            Move::Down => Some(Offset::new(1, 0)),
        }
    }

    /// Symbol used by the input boundary and the journal
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rotate => "up",
            Move::Left => "left",
            Move::Right => "right",
            Move::Down => "down",
        }
    }
}

/// Returned when a move symbol is not one of `up`, `left`, `right`, `down`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized move symbol `{0}`")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parse a move symbol (case-insensitive); `rotate` is accepted as an alias of `up`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "rotate" => Ok(Move::Rotate),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            "down" => Ok(Move::Down),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven tetromino shapes in the spawn table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }

    /// Uppercase letter, as drawn in the side panel
    pub fn letter(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape `{0}`")]
pub struct ParseShapeError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" => Ok(ShapeKind::I),
            "o" => Ok(ShapeKind::O),
            "t" => Ok(ShapeKind::T),
            "s" => Ok(ShapeKind::S),
            "z" => Ok(ShapeKind::Z),
            "j" => Ok(ShapeKind::J),
            "l" => Ok(ShapeKind::L),
            _ => Err(ParseShapeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_symbols_round_trip_through_as_str() {
        for mv in Move::ALL {
            assert_eq!(mv.as_str().parse::<Move>(), Ok(mv));
        }
    }

    #[test]
    fn move_parse_is_case_insensitive_and_trims() {
        assert_eq!(" Down ".parse::<Move>(), Ok(Move::Down));
        assert_eq!("ROTATE".parse::<Move>(), Ok(Move::Rotate));
    }

    #[test]
    fn unknown_move_symbol_is_reported() {
        let err = "drop".parse::<Move>().unwrap_err();
        assert_eq!(err, ParseMoveError("drop".to_string()));
        assert_eq!(err.to_string(), "unrecognized move symbol `drop`");
    }

    #[test]
    fn location_plus_offset() {
        assert_eq!(Location::ORIGIN + Offset::new(3, 0), Location::new(3, 0));
        assert_eq!(Location::new(5, 5) + Offset::new(-1, -2), Location::new(4, 3));
    }

    #[test]
    fn max_piece_cells_matches_box_area() {
        assert_eq!(MAX_PIECE_CELLS, 16);
    }

    #[test]
    fn move_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Move::Rotate).unwrap(), "\"rotate\"");
    }
}
