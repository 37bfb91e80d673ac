use crate::piece::Locations;
use crate::types::{ShapeKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Read-only view of a game handed to renderers
///
/// `board` holds the locked cells only (row-major); the active piece is kept
/// separate in `active` so a view can style it differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub board: Vec<u8>,
    pub active: Locations,
    pub active_kind: ShapeKind,
    pub score: u32,
    pub game_over: bool,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Locked occupancy at `(row, col)`, 0 when out of range
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        if row >= self.height || col >= self.width {
            return 0;
        }
        self.board.get(row * self.width + col).copied().unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            board: vec![0; DEFAULT_BOARD_WIDTH * DEFAULT_BOARD_HEIGHT],
            active: Locations::new(),
            active_kind: ShapeKind::I,
            score: 0,
            game_over: false,
            pieces_locked: 0,
        }
    }
}
