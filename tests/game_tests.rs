//! Game tests - controller moves, locking, scoring, and game over

use blockfall::core::{
    spawn_piece, Board, ClearPolicy, Game, GameConfig, MoveOutcome, ScriptedShapes,
};
use blockfall::types::{Location, Move, Offset, ShapeKind};

fn scripted(width: usize, height: usize, shapes: &[ShapeKind]) -> Game<ScriptedShapes> {
    let config = GameConfig {
        width,
        height,
        clear_policy: ClearPolicy::default(),
    };
    Game::with_config(config, ScriptedShapes::new(shapes.to_vec())).unwrap()
}

/// Press down until the piece locks, returning the number of free falls and the lock.
fn drop_to_floor<S: blockfall::core::ShapeSource>(game: &mut Game<S>) -> (usize, MoveOutcome) {
    let mut falls = 0;
    loop {
        match game.handle_move(Move::Down) {
            MoveOutcome::Moved => falls += 1,
            other => return (falls, other),
        }
    }
}

#[test]
fn test_new_game_starts_active_with_zero_score() {
    let game = Game::new(12345);
    assert!(!game.is_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.pieces_locked(), 0);
    assert_eq!(game.board().occupied_count(), 0);
    assert!(game.board().can_place(game.active()));
}

#[test]
fn test_spawn_is_centred_on_the_top_row() {
    let game = scripted(10, 10, &[ShapeKind::I]);
    assert_eq!(game.active().anchor(), Location::new(0, 3));
    assert_eq!(game.active_kind(), ShapeKind::I);
}

#[test]
fn test_left_stops_at_the_wall() {
    let mut game = scripted(10, 10, &[ShapeKind::I]);
    for _ in 0..3 {
        assert_eq!(game.handle_move(Move::Left), MoveOutcome::Moved);
    }
    let before = game.active().clone();
    assert_eq!(game.handle_move(Move::Left), MoveOutcome::Blocked);
    assert_eq!(game.active(), &before);
    assert_eq!(game.pieces_locked(), 0);
}

#[test]
fn test_blocked_rotation_is_a_no_op() {
    let mut game = scripted(10, 10, &[ShapeKind::I]);
    for _ in 0..4 {
        assert_eq!(game.handle_move(Move::Right), MoveOutcome::Moved);
    }
    // Vertical bar in column 7; lying flat would need columns 7..=10.
    let before = game.active().clone();
    assert_eq!(game.handle_move(Move::Rotate), MoveOutcome::Blocked);
    assert_eq!(game.active(), &before);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_down_locks_and_spawns_the_next_shape() {
    let mut game = scripted(10, 10, &[ShapeKind::I, ShapeKind::O]);
    let (falls, outcome) = drop_to_floor(&mut game);
    assert_eq!(falls, 6);
    assert_eq!(
        outcome,
        MoveOutcome::Locked {
            rows_cleared: 0,
            game_over: false
        }
    );
    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.active_kind(), ShapeKind::O);
    for row in 6..10 {
        assert!(game.board().is_occupied(Location::new(row, 3)));
    }
}

#[test]
fn test_full_row_scores_one_point() {
    let mut game = scripted(4, 4, &[ShapeKind::I]);
    assert_eq!(game.handle_move(Move::Rotate), MoveOutcome::Moved);
    let (falls, outcome) = drop_to_floor(&mut game);
    assert_eq!(falls, 3);
    assert_eq!(
        outcome,
        MoveOutcome::Locked {
            rows_cleared: 1,
            game_over: false
        }
    );
    assert_eq!(game.score(), 1);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut game = scripted(10, 10, &[ShapeKind::I]);

    let (_, first) = drop_to_floor(&mut game);
    assert_eq!(
        first,
        MoveOutcome::Locked {
            rows_cleared: 0,
            game_over: false
        }
    );

    let (falls, second) = drop_to_floor(&mut game);
    assert_eq!(falls, 2);
    assert_eq!(
        second,
        MoveOutcome::Locked {
            rows_cleared: 0,
            game_over: true
        }
    );
    assert!(game.is_over());
    assert_eq!(game.pieces_locked(), 2);
}

#[test]
fn test_moves_after_game_over_are_rejected() {
    let mut game = scripted(10, 10, &[ShapeKind::I]);
    drop_to_floor(&mut game);
    drop_to_floor(&mut game);
    assert!(game.is_over());

    let board = game.board().clone();
    let score = game.score();
    for mv in Move::ALL {
        assert_eq!(game.handle_move(mv), MoveOutcome::Rejected);
    }
    assert_eq!(game.board(), &board);
    assert_eq!(game.score(), score);
}

#[test]
fn test_game_is_over_when_first_piece_cannot_spawn() {
    let rows: Vec<Vec<u8>> = vec![vec![1; 10]; 10];
    let game = Game::with_board(
        Board::from_rows(&rows).unwrap(),
        ScriptedShapes::new(vec![ShapeKind::T]),
        ClearPolicy::default(),
    );
    assert!(game.is_over());
}

#[test]
fn test_symbols_drive_the_game() {
    let mut game = scripted(10, 10, &[ShapeKind::I]);
    assert_eq!(game.handle_symbol("left"), Ok(MoveOutcome::Moved));
    assert_eq!(game.handle_symbol(" UP "), Ok(MoveOutcome::Moved));
    assert_eq!(game.active().anchor(), Location::new(0, 2));

    let before = game.active().clone();
    assert!(game.handle_symbol("jump").is_err());
    assert_eq!(game.active(), &before);
}

#[test]
fn test_preview_merges_the_active_piece() {
    let game = scripted(10, 10, &[ShapeKind::O]);
    let preview = game.preview();
    assert_eq!(preview.occupied_count(), 4);
    assert_eq!(game.board().occupied_count(), 0);

    let snap = game.snapshot();
    assert_eq!(snap.active.len(), 4);
    assert_eq!(snap.score, 0);
    assert!(snap.playable());
}

#[test]
fn test_same_seed_same_shapes() {
    let mut a = Game::new(7);
    let mut b = Game::new(7);
    for _ in 0..5 {
        assert_eq!(a.active_kind(), b.active_kind());
        drop_to_floor(&mut a);
        drop_to_floor(&mut b);
        if a.is_over() {
            break;
        }
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_placed_piece_locks_from_a_scripted_position() {
    let mut game = scripted(4, 4, &[ShapeKind::I]);
    let floor_bar = spawn_piece(ShapeKind::I, 4)
        .rotate()
        .translate(Offset::new(3, 0));
    assert!(game.place_active(floor_bar.clone()));
    assert_eq!(game.active(), &floor_bar);

    // One row lower is off the board, so the current piece stays.
    assert!(!game.place_active(floor_bar.translate(Offset::new(1, 0))));
    assert_eq!(game.active(), &floor_bar);

    assert_eq!(
        game.handle_move(Move::Down),
        MoveOutcome::Locked {
            rows_cleared: 1,
            game_over: false
        }
    );
    assert_eq!(game.score(), 1);
    assert_eq!(game.board().occupied_count(), 0);
}

#[test]
fn test_place_active_is_refused_after_game_over() {
    let mut game = scripted(4, 4, &[ShapeKind::I]);
    assert_eq!(
        game.handle_move(Move::Down),
        MoveOutcome::Locked {
            rows_cleared: 0,
            game_over: true
        }
    );
    let before = game.active().clone();
    assert!(!game.place_active(spawn_piece(ShapeKind::I, 4).translate(Offset::new(0, 2))));
    assert_eq!(game.active(), &before);
}
