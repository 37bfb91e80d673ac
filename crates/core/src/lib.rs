//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the piece/board model and the controller that drives it.
//! It has **zero dependencies** on UI, timing, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every geometric rule is checked by unit and integration tests
//! - **Portable**: Runs the same in the terminal binary, benches, or headless tests
//!
//! # Module Structure
//!
//! - [`piece`]: offset-based pieces with bounding-box rotation and translation
//! - [`shapes`]: the seven-shape spawn table and spawn anchor
//! - [`board`]: occupancy grid with collision checks, merging, and row clearing
//! - [`game`]: the move-driven controller (lock, clear, spawn, game over)
//! - [`rng`]: seeded uniform shape draws
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Rotation**: 90° clockwise inside a 4x4 box, `(row, col) -> (col, 3 - row)`;
//!   no wall kicks, a blocked rotation is simply refused
//! - **Collision**: a piece fits when every cell is on the grid and empty
//! - **Locking**: a `down` that does not fit merges the piece into the board
//! - **Clearing**: by default only the run of full rows at the bottom is removed
//! - **Score**: one point per cleared row
//! - **Game over**: the freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, MoveOutcome};
//! use blockfall_core::types::Move;
//!
//! let mut game = Game::new(12345);
//! assert_eq!(game.handle_move(Move::Down), MoveOutcome::Moved);
//!
//! // Drop the piece all the way; the blocked move locks it.
//! while game.handle_move(Move::Down) == MoveOutcome::Moved {}
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, ClearPolicy};
pub use game::{Game, GameConfig, MoveOutcome};
pub use piece::{Locations, Piece, PieceError};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng, UniformShapes};
pub use shapes::{shape_offsets, spawn_location, spawn_piece};
pub use snapshot::GameSnapshot;
