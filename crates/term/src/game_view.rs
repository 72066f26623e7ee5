//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorIndex, Phase, MAX_SHAPE_DIM};

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

/// Display colors for the default palette, in [`ColorIndex`] order.
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(80, 220, 220),  // cyan
    Rgb::new(80, 120, 220),  // blue
    Rgb::new(255, 165, 0),   // orange
    Rgb::new(240, 220, 80),  // yellow
    Rgb::new(100, 220, 120), // green
    Rgb::new(200, 120, 220), // purple
    Rgb::new(220, 80, 80),   // red
];

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';

/// Display color for a palette index. Indices past the palette wrap around.
pub fn color_rgb(color: ColorIndex) -> Rgb {
    PALETTE[color.index() as usize % PALETTE.len()]
}

const HELP: [&str; 6] = [
    "←→  move",
    "↑   rotate",
    "↓   soft drop",
    "SPC hard drop",
    "P   pause",
    "Q   quit",
];

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the grid frame plus its size in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).cell(' '));

        let frame = self.frame(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, border);

        // Locked grid cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.color_at(x, y) {
                    Some(color) => self.draw_block(fb, frame, x as i32, y as i32, color),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(ghost) = &snap.ghost {
            let style = CellStyle::new(color_rgb(ghost.color).mix(BOARD_BG, 160), BOARD_BG).dim();
            for (x, y) in ghost.cells() {
                if self.in_grid(snap, x, y) {
                    self.fill_cell_rect(fb, frame, x as u16, y as u16, '░', style);
                }
            }
        }

        if let Some(active) = &snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, frame, x, y, active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Stopped => self.draw_overlay_text(fb, frame, &["PRESS ENTER"]),
            Phase::Paused => self.draw_overlay_text(fb, frame, &["PAUSED"]),
            Phase::GameOver => self.draw_overlay_text(fb, frame, &["GAME OVER", "R: RESTART"]),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (snap.height as u16).saturating_mul(self.cell_h).saturating_add(2);
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    fn in_grid(&self, snap: &GameSnapshot, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < snap.width && (y as usize) < snap.height
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    /// Draw one colored block; cells above or outside the grid are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, color: ColorIndex) {
        let inside_w = (frame.w.saturating_sub(2) / self.cell_w) as i32;
        let inside_h = (frame.h.saturating_sub(2) / self.cell_h) as i32;
        if x < 0 || y < 0 || x >= inside_w || y >= inside_h {
            return;
        }
        let style = CellStyle::new(color_rgb(color), BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x as u16, y as u16, BLOCK, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y.saturating_add(1), snap.tick_ms, value);
        fb.put_str(end, y.saturating_add(1), "ms", value.dim());
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = &snap.next {
            self.draw_preview(fb, panel_x, y, next);
        }
        y = y.saturating_add(MAX_SHAPE_DIM as u16 * self.cell_h + 1);

        if y.saturating_add(HELP.len() as u16) <= viewport.height && panel_w >= 14 {
            let help = value.dim();
            for line in HELP {
                fb.put_str(panel_x, y, line, help);
                y = y.saturating_add(1);
            }
        }
    }

    /// Draw `piece`'s shape with its top-left at terminal position (x, y).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        let style = CellStyle::new(color_rgb(piece.color), SCREEN_BG).bold();
        for (dx, dy) in piece.shape.minos() {
            let px = x.saturating_add(dx as u16 * self.cell_w);
            let py = y.saturating_add(dy as u16 * self.cell_h);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Engine, PieceKind};

    fn has_text(fb: &FrameBuffer, text: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(text))
    }

    fn playing_snapshot() -> GameSnapshot {
        GameSnapshot {
            width: 10,
            height: 20,
            grid: vec![0; 200],
            phase: Phase::Playing,
            level: 1,
            tick_ms: 1000,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn frame_is_centered_for_classic_grid() {
        let fb = GameView::default().render(&playing_snapshot(), Viewport::new(80, 24));
        // 10 cells * 2 columns + border = 22 wide; 20 rows + border = 22 tall
        assert_eq!(fb.get(29, 1).unwrap().ch, '┌');
        assert_eq!(fb.get(50, 1).unwrap().ch, '┐');
        assert_eq!(fb.get(29, 22).unwrap().ch, '└');
        assert_eq!(fb.get(30, 2).unwrap().ch, '·');
    }

    #[test]
    fn locked_cells_use_palette_color() {
        let mut snap = playing_snapshot();
        snap.grid[19 * 10 + 3] = ColorIndex::new(2).encode();

        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        for x in [36, 37] {
            let cell = fb.get(x, 21).unwrap();
            assert_eq!(cell.ch, BLOCK);
            assert_eq!(cell.style.fg, Rgb::new(255, 165, 0));
        }
        assert_eq!(fb.get(38, 21).unwrap().ch, '·');
    }

    #[test]
    fn active_piece_and_ghost_are_drawn() {
        let mut snap = playing_snapshot();
        let piece = Piece::new(PieceKind::I.shape(), ColorIndex::new(0), 3, 0);
        snap.active = Some(piece);
        snap.ghost = Some(piece.translated(0, 19));

        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(80, 24));
        // frame at (29, 0); grid cell (3, 0) starts at column 36, row 1
        assert_eq!(fb.get(36, 1).unwrap().ch, BLOCK);
        assert_eq!(fb.get(36, 1).unwrap().style.fg, PALETTE[0]);
        assert_eq!(fb.get(36, 20).unwrap().ch, '░');
    }

    #[test]
    fn piece_cells_above_grid_are_clipped() {
        let mut snap = playing_snapshot();
        snap.active = Some(Piece::new(PieceKind::T.shape(), ColorIndex::new(5), 4, -1));
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        // Only the bottom row of the T is inside the grid
        let blocks = fb.cells().iter().filter(|c| c.ch == BLOCK).count();
        assert_eq!(blocks, 3 * 2);
    }

    #[test]
    fn side_panel_shows_stats_and_next() {
        let mut snap = playing_snapshot();
        snap.score = 5600;
        snap.level = 6;
        snap.lines = 12;
        snap.tick_ms = 166;
        snap.next = Some(Piece::new(PieceKind::O.shape(), ColorIndex::new(3), 4, 0));

        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(has_text(&fb, "SCORE"));
        assert!(has_text(&fb, "5600"));
        assert!(has_text(&fb, "LINES"));
        assert!(has_text(&fb, "12"));
        assert!(has_text(&fb, "166ms"));
        assert!(has_text(&fb, "NEXT"));
        assert!(has_text(&fb, "SPC hard drop"));
        // O preview is 2x2 cells of 2 columns
        let preview = fb
            .cells()
            .iter()
            .filter(|c| c.ch == BLOCK && c.style.fg == PALETTE[3])
            .count();
        assert_eq!(preview, 8);
    }

    #[test]
    fn phase_overlays() {
        let mut snap = playing_snapshot();
        let view = GameView::default();
        let vp = Viewport::new(80, 24);

        assert!(!has_text(&view.render(&snap, vp), "PAUSED"));

        snap.phase = Phase::Stopped;
        assert!(has_text(&view.render(&snap, vp), "PRESS ENTER"));

        snap.phase = Phase::Paused;
        assert!(has_text(&view.render(&snap, vp), "PAUSED"));

        snap.phase = Phase::GameOver;
        let fb = view.render(&snap, vp);
        assert!(has_text(&fb, "GAME OVER"));
        assert!(has_text(&fb, "R: RESTART"));
    }

    #[test]
    fn custom_grid_size_from_engine() {
        let cfg = crate::core::EngineConfig {
            grid_width: 6,
            grid_height: 8,
            ..Default::default()
        };
        let engine = Engine::new(cfg, 3).unwrap();
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&engine.snapshot(), Viewport::new(40, 12));
        // 6 * 2 + 2 = 14 wide, centered in 40
        assert_eq!(fb.get(13, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(26, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(13, 9).unwrap().ch, '└');
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let engine = Engine::classic(1);
        let mut fb = FrameBuffer::new(0, 0);
        GameView::default().render_into(&engine.snapshot(), Viewport::new(8, 4), &mut fb);
        assert_eq!((fb.width(), fb.height()), (8, 4));
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(color_rgb(ColorIndex::new(7)), PALETTE[0]);
        assert_eq!(color_rgb(ColorIndex::new(6)), PALETTE[6]);
    }
}
