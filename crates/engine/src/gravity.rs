//! Gravity scheduler - periodic synthetic `down` commands.
//!
//! The controller has no notion of time. Gravity is an external producer that
//! feeds the same command channel as keyboard input.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::command::{Command, CommandSender};

/// Spawn a task that sends [`Command::gravity`] every `interval`.
///
/// The task ends when the consumer side of the channel is dropped.
pub fn spawn_gravity(handle: &Handle, interval: Duration, tx: CommandSender) -> JoinHandle<()> {
    handle.spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so the first fall
        // happens one full interval after start.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !tx.send(Command::gravity()).await {
                break;
            }
        }
    })
}
