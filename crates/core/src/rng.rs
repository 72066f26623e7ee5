//! RNG module - uniform random piece generation
//!
//! Every piece independently draws a shape uniformly from the catalog and a
//! color uniformly from the palette. No bag or history is kept.
//!
//! The generator is a seeded LCG so whole games are reproducible.

use crate::pieces::{Piece, ShapeCatalog};
use crate::types::ColorIndex;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits (multiply-shift) since the low bits of an LCG cycle
    /// with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws random pieces from a catalog and palette.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Uniform (shape index, color) pair.
    pub fn draw_indices(&mut self, shapes: usize, palette_size: u8) -> (usize, ColorIndex) {
        let shape = self.rng.next_range(shapes as u32) as usize;
        let color = self.rng.next_range(palette_size as u32) as u8;
        (shape, ColorIndex::new(color))
    }

    /// Draw a piece at its spawn position on a grid `grid_width` wide.
    ///
    /// # Panics
    ///
    /// Panics if `catalog` is empty; `EngineConfig::validate` rejects that.
    pub fn draw(&mut self, catalog: &ShapeCatalog, palette_size: u8, grid_width: usize) -> Piece {
        let (index, color) = self.draw_indices(catalog.len(), palette_size);
        Piece::spawn(catalog.shapes()[index], color, grid_width)
    }

    /// Current RNG state (seeding a new generator with it continues the sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
