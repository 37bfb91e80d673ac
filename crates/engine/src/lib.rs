//! Engine module - drives a game from serialized commands
//!
//! The core controller is pure and untimed. This crate supplies everything
//! around it that a running game needs:
//!
//! 1. **Commands**: a bounded single-consumer channel every input source feeds
//! 2. **Gravity**: a scheduler that injects synthetic `down` moves
//! 3. **Session**: the consumer that applies commands and journals outcomes
//! 4. **Journal**: an optional JSON-lines event log written in the background
//! 5. **Config**: `BLOCKFALL_*` environment variables
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_WIDTH` / `BLOCKFALL_HEIGHT`: board size (default 10x10)
//! - `BLOCKFALL_GRAVITY_MS`: auto-descent interval, `0` disables (default 1000)
//! - `BLOCKFALL_SEED`: shape RNG seed (default: derived from the clock)
//! - `BLOCKFALL_CLEAR_POLICY`: `contiguous` (default) or `all`
//! - `BLOCKFALL_LOG_PATH`: append a JSON-lines journal to this file
//! - `BLOCKFALL_QUEUE_DEPTH`: command channel capacity (default 32)
//!
//! # Journal Format
//!
//! ```text
//! {"type":"start","width":10,"height":10,"seed":7,"clear_policy":"contiguous","first":"T"}
//! {"type":"move","seq":1,"move":"left","origin":"player","outcome":"moved"}
//! {"type":"move","seq":2,"move":"down","origin":"gravity","outcome":"locked"}
//! {"type":"lock","seq":2,"rows_cleared":1,"score":1,"pieces_locked":1,"next":"O"}
//! ```

pub mod command;
pub mod config;
pub mod gravity;
pub mod journal;
pub mod runtime;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use command::{command_channel, Command, CommandReceiver, CommandSender, Origin};
pub use config::{ConfigError, EngineConfig};
pub use gravity::spawn_gravity;
pub use journal::{encode_line, GameEvent, Journal, WriterReport};
pub use runtime::Runtime;
pub use session::{Session, Step};
