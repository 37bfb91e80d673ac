//! JSON-lines event journal.
//!
//! Events are handed to a background writer over an unbounded channel so the
//! game loop never waits on file I/O. One JSON object per line.
//!
//! The writer never prints while the game owns the terminal. Problems are
//! collected in a [`WriterReport`] and reported once the writer finishes.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::command::Origin;
use crate::types::{Move, ShapeKind};

/// One journal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Start {
        width: usize,
        height: usize,
        seed: u32,
        clear_policy: &'static str,
        first: ShapeKind,
    },
    Move {
        seq: u64,
        #[serde(rename = "move")]
        mv: Move,
        origin: Origin,
        outcome: &'static str,
    },
    Lock {
        seq: u64,
        rows_cleared: usize,
        score: u32,
        pieces_locked: u32,
        next: ShapeKind,
    },
    GameOver {
        seq: u64,
        score: u32,
        pieces_locked: u32,
    },
}

/// Encode one event as a journal line (without the trailing newline)
pub fn encode_line(event: &GameEvent) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

/// What the background writer managed to do
#[derive(Debug, Default)]
pub struct WriterReport {
    pub written: u64,
    /// Events dropped because they could not be encoded
    pub unencodable: u64,
    pub first_encode_error: Option<String>,
    /// Write or flush failure; writing stops at the first one
    pub io_error: Option<std::io::Error>,
}

impl WriterReport {
    pub fn is_clean(&self) -> bool {
        self.unencodable == 0 && self.io_error.is_none()
    }

    /// One tagged stderr line per kind of problem
    pub fn log(&self) {
        if let Some(err) = &self.first_encode_error {
            eprintln!(
                "[Engine] journal: dropped {} unencodable event(s), first: {err}",
                self.unencodable
            );
        }
        if let Some(err) = &self.io_error {
            eprintln!(
                "[Engine] journal: write failed after {} line(s): {err}",
                self.written
            );
        }
    }
}

/// Drain `rx` into `out` as JSON lines until every sender is gone
async fn write_events<W>(mut out: W, mut rx: mpsc::UnboundedReceiver<GameEvent>) -> WriterReport
where
    W: AsyncWrite + Unpin,
{
    let mut report = WriterReport::default();
    let mut buf: Vec<u8> = Vec::with_capacity(256);

    while let Some(event) = rx.recv().await {
        buf.clear();
        if let Err(err) = serde_json::to_writer(&mut buf, &event) {
            report.unencodable += 1;
            report.first_encode_error.get_or_insert_with(|| err.to_string());
            continue;
        }
        buf.push(b'\n');
        if let Err(err) = out.write_all(&buf).await {
            report.io_error = Some(err);
            return report;
        }
        report.written += 1;
    }

    if let Err(err) = out.flush().await {
        report.io_error = Some(err);
    }
    report
}

/// Handle for recording events; a disabled journal drops everything
#[derive(Debug)]
pub struct Journal {
    tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl Journal {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Open `path` for appending and start the writer task on `rt`
    pub fn open(rt: &Runtime, path: &str) -> Result<(Self, JoinHandle<WriterReport>)> {
        let file = rt
            .block_on(OpenOptions::new().create(true).append(true).open(path))
            .with_context(|| format!("failed to open journal at {path}"))?;

        let (tx, rx) = mpsc::unbounded_channel::<GameEvent>();
        let writer = rt.spawn(write_events(file, rx));

        Ok((Self { tx: Some(tx) }, writer))
    }

    /// A journal whose records go to `tx`; for tests and in-process observers
    pub fn to_channel(tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record(&self, event: GameEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
