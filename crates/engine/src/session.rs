//! Session: the single consumer that applies commands to a game.

use crate::command::{Command, Origin};
use crate::core::{Game, MoveOutcome, ShapeSource, UniformShapes};
use crate::journal::{GameEvent, Journal};
use crate::types::Move;

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Applied(MoveOutcome),
    Redraw,
    Quit,
}

pub struct Session<S = UniformShapes> {
    game: Game<S>,
    journal: Journal,
    seq: u64,
}

impl<S: ShapeSource> Session<S> {
    pub fn new(game: Game<S>, journal: Journal) -> Self {
        Self {
            game,
            journal,
            seq: 0,
        }
    }

    /// Record the `start` event; call once before the first command
    pub fn announce(&self, seed: u32) {
        let board = self.game.board();
        self.journal.record(GameEvent::Start {
            width: board.width(),
            height: board.height(),
            seed,
            clear_policy: self.game.clear_policy().as_str(),
            first: self.game.active_kind(),
        });
    }

    /// Apply one command.
    ///
    /// Once the game is over, the next player move ends the session.
    /// Gravity moves are still rejected so the final frame stays up.
    pub fn apply(&mut self, cmd: Command) -> Step {
        match cmd {
            Command::Move {
                origin: Origin::Player,
                ..
            } if self.game.is_over() => Step::Quit,
            Command::Move { mv, origin } => Step::Applied(self.apply_move(mv, origin)),
            Command::Redraw => Step::Redraw,
            Command::Quit => Step::Quit,
        }
    }

    fn apply_move(&mut self, mv: Move, origin: Origin) -> MoveOutcome {
        let outcome = self.game.handle_move(mv);
        if outcome == MoveOutcome::Rejected {
            return outcome;
        }

        self.seq += 1;
        self.journal.record(GameEvent::Move {
            seq: self.seq,
            mv,
            origin,
            outcome: outcome_name(outcome),
        });

        if let MoveOutcome::Locked {
            rows_cleared,
            game_over,
        } = outcome
        {
            self.journal.record(GameEvent::Lock {
                seq: self.seq,
                rows_cleared,
                score: self.game.score(),
                pieces_locked: self.game.pieces_locked(),
                next: self.game.active_kind(),
            });
            if game_over {
                self.journal.record(GameEvent::GameOver {
                    seq: self.seq,
                    score: self.game.score(),
                    pieces_locked: self.game.pieces_locked(),
                });
            }
        }

        outcome
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    /// Number of journaled moves so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Tear down, handing back the game and the journal
    pub fn finish(self) -> (Game<S>, Journal) {
        (self.game, self.journal)
    }
}

fn outcome_name(outcome: MoveOutcome) -> &'static str {
    match outcome {
        MoveOutcome::Moved => "moved",
        MoveOutcome::Blocked => "blocked",
        MoveOutcome::Locked { .. } => "locked",
        MoveOutcome::Rejected => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedShapes};
    use crate::types::ShapeKind;
    use tokio::sync::mpsc;

    fn session(
        shapes: &[ShapeKind],
    ) -> (
        Session<ScriptedShapes>,
        mpsc::UnboundedReceiver<GameEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let game =
            Game::with_config(GameConfig::default(), ScriptedShapes::new(shapes.to_vec())).unwrap();
        (Session::new(game, Journal::to_channel(tx)), rx)
    }

    #[test]
    fn gravity_and_player_moves_share_one_sequence() {
        let (mut s, mut rx) = session(&[ShapeKind::T]);
        s.announce(5);
        assert_eq!(
            s.apply(Command::player(Move::Left)),
            Step::Applied(MoveOutcome::Moved)
        );
        assert_eq!(s.apply(Command::gravity()), Step::Applied(MoveOutcome::Moved));

        assert!(matches!(rx.try_recv(), Ok(GameEvent::Start { seed: 5, .. })));
        assert!(matches!(
            rx.try_recv(),
            Ok(GameEvent::Move {
                seq: 1,
                origin: Origin::Player,
                ..
            })
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(GameEvent::Move {
                seq: 2,
                origin: Origin::Gravity,
                mv: Move::Down,
                ..
            })
        ));
    }

    #[test]
    fn lock_is_journaled_after_its_move() {
        let (mut s, mut rx) = session(&[ShapeKind::O]);
        while s.apply(Command::gravity()) == Step::Applied(MoveOutcome::Moved) {}

        let events: Vec<GameEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        let last_two = &events[events.len() - 2..];
        assert!(matches!(
            last_two[0],
            GameEvent::Move {
                outcome: "locked",
                ..
            }
        ));
        assert!(matches!(
            last_two[1],
            GameEvent::Lock {
                rows_cleared: 0,
                pieces_locked: 1,
                next: ShapeKind::O,
                ..
            }
        ));
    }

    #[test]
    fn redraw_and_quit_do_not_touch_the_game() {
        let (mut s, _rx) = session(&[ShapeKind::I]);
        assert_eq!(s.apply(Command::Redraw), Step::Redraw);
        assert_eq!(s.apply(Command::Quit), Step::Quit);
        assert_eq!(s.seq(), 0);
        assert_eq!(s.game().moves_applied(), 0);
    }

    #[test]
    fn player_key_after_game_over_ends_the_session() {
        let (mut s, _rx) = session(&[ShapeKind::I]);
        while !s.game().is_over() {
            s.apply(Command::gravity());
        }
        let seq = s.seq();

        assert_eq!(
            s.apply(Command::gravity()),
            Step::Applied(MoveOutcome::Rejected)
        );
        assert_eq!(s.apply(Command::player(Move::Left)), Step::Quit);
        assert_eq!(s.seq(), seq);
    }
}
