//! Grid module - the board of locked cells
//!
//! The grid is W×H cells, each empty or holding the color of the piece that
//! locked there. Storage is a flat row-major vector sized once at creation.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the grid (y < 0) exist only for collision purposes: pieces may
//! overhang them, but nothing is ever stored there.

use crate::pieces::Piece;
use crate::types::{encode_cell, Cell, ColorIndex};

/// The locked-cell board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    /// Cells of row `y`, left to right. Empty slice when out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row holds at least one locked cell
    pub fn is_row_occupied(&self, y: usize) -> bool {
        self.row(y).iter().any(|cell| cell.is_some())
    }

    /// Whether `piece` overlaps a wall, the floor or a locked cell.
    ///
    /// A cell above the top edge only collides when it is also outside the
    /// horizontal bounds.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write the piece's color into every occupied cell inside the grid.
    ///
    /// Cells above the top edge are dropped. Returns the number of cells written.
    pub fn lock(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(piece.color)) {
                written += 1;
            }
        }
        written
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at the top.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Clear all full rows, scanning top to bottom. Returns how many were cleared.
    ///
    /// Rows above the current index were already scanned and are not full, so
    /// shifting them down into the scanned position never hides a full row.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Encode every cell as `u8` (0 = empty, color + 1 otherwise), row-major.
    pub fn write_u8_cells(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&cell| encode_cell(cell)));
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from ASCII rows for tests: `.` is empty, a digit is a
    /// color index and any other character is color 0.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged test grid");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    d if d.is_ascii_digit() => Some(ColorIndex::new(d as u8 - b'0')),
                    _ => Some(ColorIndex::new(0)),
                };
                grid.set(x as i32, y as i32, cell);
            }
        }
        grid
    }

    /// Fill row `y` with color 0, leaving the listed columns empty.
    pub fn fill_row_except(&mut self, y: usize, holes: &[usize]) {
        for x in 0..self.width {
            let cell = if holes.contains(&x) {
                None
            } else {
                Some(ColorIndex::new(0))
            };
            self.set(x as i32, y as i32, cell);
        }
    }
}
