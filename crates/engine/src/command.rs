//! Serialized command channel.
//!
//! Keyboard input and the gravity scheduler both push into one bounded tokio
//! channel; the game loop is its only consumer, so moves reach the controller
//! one at a time and in arrival order.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::types::Move;

/// Where a move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Player,
    Gravity,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Player => "player",
            Origin::Gravity => "gravity",
        }
    }
}

/// Command delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { mv: Move, origin: Origin },
    /// The terminal changed size; repaint everything
    Redraw,
    Quit,
}

impl Command {
    pub fn player(mv: Move) -> Self {
        Command::Move {
            mv,
            origin: Origin::Player,
        }
    }

    /// The synthetic `down` injected by the gravity scheduler
    pub fn gravity() -> Self {
        Command::Move {
            mv: Move::Down,
            origin: Origin::Gravity,
        }
    }
}

/// Producer half; cheap to clone, one per input source
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Command>,
}

impl CommandSender {
    /// Send from async code. Returns false once the consumer is gone.
    pub async fn send(&self, cmd: Command) -> bool {
        self.tx.send(cmd).await.is_ok()
    }

    /// Send from a plain thread (must not be called from inside the runtime).
    pub fn blocking_send(&self, cmd: Command) -> bool {
        self.tx.blocking_send(cmd).is_ok()
    }

    /// Send without waiting; false if the queue is full or closed
    pub fn try_send(&self, cmd: Command) -> bool {
        self.tx.try_send(cmd).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half; exactly one exists per channel
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::Receiver<Command>,
}

impl CommandReceiver {
    pub async fn recv(&mut self) -> Option<Command> {
        self.rx.recv().await
    }

    /// Block the current (non-runtime) thread until a command arrives
    pub fn blocking_recv(&mut self) -> Option<Command> {
        self.rx.blocking_recv()
    }

    pub fn try_recv(&mut self) -> Option<Command> {
        self.rx.try_recv().ok()
    }
}

/// Create a bounded command channel holding at most `depth` pending commands
pub fn command_channel(depth: usize) -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel(depth.max(1));
    (CommandSender { tx }, CommandReceiver { rx })
}
