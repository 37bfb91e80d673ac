//! Terminal game renderer.
//!
//! Renders into a plain framebuffer that is diffed against the previous frame
//! and flushed through crossterm. Board cells are two columns wide so the grid
//! looks square in a typical terminal font.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
