//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShapeKind;

/// Glyph for an occupied cell.
pub const FILLED_GLYPH: char = '#';
/// Top and bottom border glyph.
pub const BORDER_HORIZONTAL: char = '*';
/// Left and right border glyph.
pub const BORDER_VERTICAL: char = '|';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board renderer.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the bordered board landed in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let w = to_u16(snap.width).saturating_mul(self.cell_w).saturating_add(2);
        let h = to_u16(snap.height).saturating_mul(self.cell_h).saturating_add(2);
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame);

        let locked = CellStyle::fg(Rgb::new(200, 200, 200));
        let stacked = CellStyle::fg(Rgb::new(220, 80, 80)).bold();
        for row in 0..snap.height {
            for col in 0..snap.width {
                match snap.cell(row, col) {
                    0 => {}
                    1 => self.fill_cell(fb, frame, row, col, locked),
                    _ => self.fill_cell(fb, frame, row, col, stacked),
                }
            }
        }

        let active = CellStyle::fg(shape_color(snap.active_kind)).bold();
        for loc in snap.active.iter() {
            if loc.row < 0 || loc.col < 0 {
                continue;
            }
            let (row, col) = (loc.row as usize, loc.col as usize);
            if row < snap.height && col < snap.width {
                self.fill_cell(fb, frame, row, col, active);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        if frame.w < 2 || frame.h < 2 {
            return;
        }
        let style = CellStyle::fg(Rgb::new(160, 160, 170));
        let bottom = frame.y + frame.h - 1;
        for dx in 0..frame.w {
            fb.put_char(frame.x + dx, frame.y, BORDER_HORIZONTAL, style);
            fb.put_char(frame.x + dx, bottom, BORDER_HORIZONTAL, style);
        }
        for dy in 1..frame.h - 1 {
            fb.put_char(frame.x, frame.y + dy, BORDER_VERTICAL, style);
            fb.put_char(frame.x + frame.w - 1, frame.y + dy, BORDER_VERTICAL, style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, row: usize, col: usize, style: CellStyle) {
        let px = frame
            .x
            .saturating_add(1)
            .saturating_add(to_u16(col).saturating_mul(self.cell_w));
        let py = frame
            .y
            .saturating_add(1)
            .saturating_add(to_u16(row).saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, FILLED_GLYPH, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces_locked, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ACTIVE", label);
        y = y.saturating_add(1);
        let active = if snap.game_over {
            '-'
        } else {
            snap.active_kind.letter()
        };
        fb.put_char(panel_x, y, active, CellStyle::fg(shape_color(snap.active_kind)));
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
