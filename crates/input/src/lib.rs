//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` events into [`crate::types::Move`] commands. Anything it does
//! not recognise decodes to `None`, so garbled or unmapped input never
//! reaches the controller.

pub mod map;

pub use blockfall_types as types;

pub use map::{decode_event, handle_key_event, should_quit, InputEvent};
