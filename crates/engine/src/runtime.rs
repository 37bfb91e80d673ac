//! Engine runtime integration.
//!
//! Owns the tokio runtime that hosts the background producers (gravity) and
//! the journal writer, and bridges them to the synchronous game loop through
//! the command channel.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

use crate::command::{command_channel, Command, CommandReceiver, CommandSender};
use crate::config::EngineConfig;
use crate::gravity::spawn_gravity;
use crate::journal::{Journal, WriterReport};

/// How long shutdown waits for the journal to drain
const JOURNAL_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Running engine instance.
pub struct Runtime {
    rt: tokio::runtime::Runtime,
    tx: CommandSender,
    rx: CommandReceiver,
    gravity: Option<JoinHandle<()>>,
    journal_writer: Option<JoinHandle<WriterReport>>,
}

impl Runtime {
    /// Start the runtime, the gravity task, and (if configured) the journal.
    pub fn start(config: &EngineConfig) -> Result<(Self, Journal)> {
        config.validate().context("invalid engine configuration")?;

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let (tx, rx) = command_channel(config.queue_depth);

        let gravity = config
            .gravity_interval()
            .map(|interval| spawn_gravity(rt.handle(), interval, tx.clone()));

        let (journal, journal_writer) = match config.log_path.as_deref() {
            Some(path) => {
                let (journal, writer) = Journal::open(&rt, path)?;
                (journal, Some(writer))
            }
            None => (Journal::disabled(), None),
        };

        Ok((
            Self {
                rt,
                tx,
                rx,
                gravity,
                journal_writer,
            },
            journal,
        ))
    }

    /// A producer handle for another input source (e.g. the keyboard thread)
    pub fn sender(&self) -> CommandSender {
        self.tx.clone()
    }

    /// Block until the next command arrives
    pub fn recv(&mut self) -> Option<Command> {
        self.rx.blocking_recv()
    }

    /// Stop producers and let the journal finish writing.
    ///
    /// Call after the terminal is restored; journal problems go to stderr.
    ///
    /// `journal` must be the handle returned by [`Runtime::start`]; dropping
    /// it closes the writer's channel.
    pub fn shutdown(self, journal: Journal) {
        drop(journal);
        if let Some(gravity) = &self.gravity {
            gravity.abort();
        }
        if let Some(writer) = self.journal_writer {
            let drained = self
                .rt
                .block_on(async { tokio::time::timeout(JOURNAL_DRAIN_TIMEOUT, writer).await });
            match drained {
                Ok(Ok(report)) => report.log(),
                Ok(Err(err)) => eprintln!("[Engine] journal: writer task failed: {err}"),
                Err(_) => eprintln!("[Engine] journal: writer did not finish in time"),
            }
        }
        self.rt.shutdown_timeout(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    #[test]
    fn player_commands_reach_the_consumer_without_gravity() {
        let config = EngineConfig {
            gravity_ms: 0,
            ..EngineConfig::default()
        };
        let (mut runtime, journal) = Runtime::start(&config).unwrap();
        assert!(!journal.is_enabled());

        let tx = runtime.sender();
        std::thread::spawn(move || {
            tx.blocking_send(Command::player(Move::Right));
            tx.blocking_send(Command::Quit);
        });

        assert_eq!(runtime.recv(), Some(Command::player(Move::Right)));
        assert_eq!(runtime.recv(), Some(Command::Quit));
        runtime.shutdown(journal);
    }

    #[test]
    fn gravity_feeds_the_same_channel() {
        let config = EngineConfig {
            gravity_ms: 5,
            ..EngineConfig::default()
        };
        let (mut runtime, journal) = Runtime::start(&config).unwrap();
        assert_eq!(runtime.recv(), Some(Command::gravity()));
        runtime.shutdown(journal);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.game.width = 0;
        assert!(Runtime::start(&config).is_err());
    }
}
