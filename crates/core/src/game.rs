//! Game module - the controller tying board, active piece, and spawning together
//!
//! The controller accepts one [`Move`] at a time. A move builds a candidate
//! piece, asks the board whether it fits, and either adopts it or leaves the
//! active piece alone. A blocked `down` locks the piece, clears rows, and
//! spawns the next shape; if that shape does not fit the game is over.

use crate::board::{Board, BoardError, ClearPolicy};
use crate::piece::Piece;
use crate::rng::{ShapeSource, UniformShapes};
use crate::shapes::spawn_piece;
use crate::snapshot::GameSnapshot;
use crate::types::{Move, ParseMoveError, ShapeKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Static parameters of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub clear_policy: ClearPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            clear_policy: ClearPolicy::default(),
        }
    }
}

/// What a single move did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The candidate fit and is now the active piece
    Moved,
    /// The candidate did not fit; nothing changed
    Blocked,
    /// A blocked `down` locked the piece and spawned the next one
    Locked { rows_cleared: usize, game_over: bool },
    /// The game is over and accepts no more moves
    Rejected,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S = UniformShapes> {
    board: Board,
    active: Piece,
    active_kind: ShapeKind,
    source: S,
    clear_policy: ClearPolicy,
    score: u32,
    over: bool,
    pieces_locked: u32,
    moves_applied: u32,
}

impl Game<UniformShapes> {
    /// Create a default 10x10 game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(Board::default(), UniformShapes::new(seed), ClearPolicy::default())
    }
}

impl<S: ShapeSource> Game<S> {
    /// Create a game with an empty board sized by `config`
    pub fn with_config(config: GameConfig, source: S) -> Result<Self, BoardError> {
        let board = Board::new(config.width, config.height)?;
        Ok(Self::with_board(board, source, config.clear_policy))
    }

    /// Start a game on an existing board, spawning the first piece from `source`
    ///
    /// If the first piece does not fit, the game starts over.
    pub fn with_board(board: Board, mut source: S, clear_policy: ClearPolicy) -> Self {
        let kind = source.next_shape();
        let active = spawn_piece(kind, board.width());
        let over = !board.can_place(&active);
        Self {
            board,
            active,
            active_kind: kind,
            source,
            clear_policy,
            score: 0,
            over,
            pieces_locked: 0,
            moves_applied: 0,
        }
    }

    /// Replace the active piece, e.g. to set up a scripted position.
    ///
    /// Returns false (and keeps the current piece) if `piece` does not fit.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if self.over || !self.board.can_place(&piece) {
            return false;
        }
        self.active = piece;
        true
    }

    /// Apply one move command
    pub fn handle_move(&mut self, mv: Move) -> MoveOutcome {
        if self.over {
            return MoveOutcome::Rejected;
        }

        let candidate = match mv.offset() {
            Some(offset) => self.active.translate(offset),
            None => self.active.rotate(),
        };

        if self.board.can_place(&candidate) {
            self.active = candidate;
            self.moves_applied += 1;
            return MoveOutcome::Moved;
        }

        if mv != Move::Down {
            return MoveOutcome::Blocked;
        }

        self.moves_applied += 1;
        self.lock_active()
    }

    /// Parse and apply a move symbol (`up`, `left`, `right`, `down`)
    ///
    /// Unknown symbols are reported and leave the game untouched.
    pub fn handle_symbol(&mut self, symbol: &str) -> Result<MoveOutcome, ParseMoveError> {
        let mv: Move = symbol.parse()?;
        Ok(self.handle_move(mv))
    }

    /// Merge the active piece, clear rows, spawn the next piece
    fn lock_active(&mut self) -> MoveOutcome {
        let (board, rows_cleared) = self
            .board
            .with_piece(&self.active)
            .clear_with(self.clear_policy);
        self.board = board;
        self.score += rows_cleared as u32;
        self.pieces_locked += 1;

        self.active_kind = self.source.next_shape();
        self.active = spawn_piece(self.active_kind, self.board.width());
        if !self.board.can_place(&self.active) {
            self.over = true;
        }

        MoveOutcome::Locked {
            rows_cleared,
            game_over: self.over,
        }
    }

    /// Locked cells merged with the active piece, for rendering
    pub fn preview(&self) -> Board {
        self.board.with_piece(&self.active)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot, reusing its allocation
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        snap.width = self.board.width();
        snap.height = self.board.height();
        snap.board.clear();
        snap.board.extend_from_slice(self.board.cells());
        snap.active = self.active.locations();
        snap.active_kind = self.active_kind;
        snap.score = self.score;
        snap.game_over = self.over;
        snap.pieces_locked = self.pieces_locked;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn active_kind(&self) -> ShapeKind {
        self.active_kind
    }

    /// Rows cleared so far
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn moves_applied(&self) -> u32 {
        self.moves_applied
    }

    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedShapes;
    use crate::types::Location;

    fn scripted(shapes: &[ShapeKind]) -> Game<ScriptedShapes> {
        Game::with_config(GameConfig::default(), ScriptedShapes::new(shapes.to_vec())).unwrap()
    }

    #[test]
    fn test_new_game_is_active_with_zero_score() {
        let game = Game::new(1);
        assert!(!game.is_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().occupied_count(), 0);
        assert_eq!(game.active().anchor(), Location::new(0, 3));
    }

    #[test]
    fn test_blocked_side_move_is_a_no_op() {
        let mut game = scripted(&[ShapeKind::I]);
        while game.handle_move(Move::Left) == MoveOutcome::Moved {}
        let before = game.active().clone();
        assert_eq!(game.handle_move(Move::Left), MoveOutcome::Blocked);
        assert_eq!(game.active(), &before);
        assert_eq!(game.pieces_locked(), 0);
    }

    #[test]
    fn test_blocked_rotation_does_not_lock() {
        // A vertical bar in the rightmost column cannot turn: its box would
        // stick out past the right edge.
        let mut game = scripted(&[ShapeKind::I]);
        while game.handle_move(Move::Right) == MoveOutcome::Moved {}
        assert_eq!(game.active().anchor().col, 9);
        assert_eq!(game.handle_move(Move::Rotate), MoveOutcome::Blocked);
        assert_eq!(game.pieces_locked(), 0);
    }

    #[test]
    fn test_blocked_down_locks_and_spawns() {
        let mut game = scripted(&[ShapeKind::O, ShapeKind::T]);
        let mut outcome = MoveOutcome::Moved;
        while outcome == MoveOutcome::Moved {
            outcome = game.handle_move(Move::Down);
        }
        assert_eq!(
            outcome,
            MoveOutcome::Locked {
                rows_cleared: 0,
                game_over: false
            }
        );
        assert_eq!(game.board().occupied_count(), 4);
        assert_eq!(game.active_kind(), ShapeKind::T);
        assert_eq!(game.pieces_locked(), 1);
    }

    #[test]
    fn test_unknown_symbol_leaves_state_alone() {
        let mut game = scripted(&[ShapeKind::T]);
        let before = game.active().clone();
        assert!(game.handle_symbol("sideways").is_err());
        assert_eq!(game.active(), &before);
        assert_eq!(game.moves_applied(), 0);
        assert_eq!(game.handle_symbol("down"), Ok(MoveOutcome::Moved));
    }

    #[test]
    fn test_spawn_on_tiny_board_starts_over() {
        let game = Game::with_config(
            GameConfig {
                width: 2,
                height: 2,
                clear_policy: ClearPolicy::default(),
            },
            ScriptedShapes::new(vec![ShapeKind::I]),
        )
        .unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let game = scripted(&[ShapeKind::O]);
        let snap = game.snapshot();
        assert_eq!(snap.width, 10);
        assert_eq!(snap.height, 10);
        assert_eq!(snap.board.len(), 100);
        assert_eq!(snap.active.as_slice(), game.active().locations().as_slice());
        assert!(!snap.game_over);
    }
}
