use crate::pieces::Piece;
use crate::types::{ColorIndex, Phase};

/// Read-only copy of everything a renderer needs after a command.
///
/// `grid` is row-major with `0` for empty and `color + 1` for locked cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<u8>,
    pub active: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: Option<Piece>,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub tick_ms: u32,
}

impl GameSnapshot {
    /// Encoded cell at (x, y); `0` outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.grid[y * self.width + x]
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<ColorIndex> {
        ColorIndex::decode(self.cell(x, y))
    }

    pub fn playable(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }
}
