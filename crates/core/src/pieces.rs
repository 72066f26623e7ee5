//! Pieces module - shape matrices, the classic catalog and pure piece transforms
//!
//! A shape is a small rectangular occupancy matrix (at most 4x4). A piece is a
//! shape placed at an anchor (the matrix's top-left corner in grid space) with
//! a color. Every transform returns a new value; nothing here consults the grid.

use arrayvec::ArrayVec;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{ColorIndex, MAX_SHAPE_DIM};

/// Offset of a single occupied cell relative to the piece anchor, as (dx, dy)
pub type MinoOffset = (i8, i8);

/// Occupied offsets of a shape, in row-major order
pub type Minos = ArrayVec<MinoOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Reasons a shape template is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no occupied cells")]
    Empty,
    #[error("shape is {rows}x{cols}, larger than the {max}x{max} limit", max = MAX_SHAPE_DIM)]
    TooLarge { rows: usize, cols: usize },
}

/// Rectangular occupancy matrix.
///
/// Stored inline so shapes and pieces are `Copy`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Rows shorter than the longest row are padded with empty cells, so
    /// `[[1, 1, 1], [1]]` is the 2x3 matrix `###/#..`.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let row_count = rows.len();
        let col_count = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        if row_count > MAX_SHAPE_DIM || col_count > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge {
                rows: row_count,
                cols: col_count,
            });
        }

        let shape = Self::fill(rows);
        if shape.occupied_count() == 0 {
            return Err(ShapeError::Empty);
        }
        Ok(shape)
    }

    /// Parse a compact `/`-separated picture, `#` marking occupied cells.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::parse(".#./###").unwrap();
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert_eq!(t.occupied_count(), 4);
    /// ```
    pub fn parse(picture: &str) -> Result<Self, ShapeError> {
        let rows: Vec<Vec<u8>> = picture
            .split('/')
            .map(|line| line.chars().map(|ch| u8::from(ch == '#')).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Copy rows into the inline matrix, ignoring anything past 4x4.
    fn fill<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut cols = 0;
        for (y, row) in rows.iter().take(MAX_SHAPE_DIM).enumerate() {
            let row = row.as_ref();
            cols = cols.max(row.len().min(MAX_SHAPE_DIM));
            for (x, &v) in row.iter().take(MAX_SHAPE_DIM).enumerate() {
                bits[y][x] = v != 0;
            }
        }
        Self {
            rows: rows.len().min(MAX_SHAPE_DIM) as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether matrix cell (row, col) is occupied; false outside the matrix.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    pub fn occupied_count(&self) -> usize {
        self.bits[..self.rows()]
            .iter()
            .map(|row| row[..self.cols()].iter().filter(|&&b| b).count())
            .sum()
    }

    /// Offsets (dx, dy) of the occupied cells.
    pub fn minos(&self) -> Minos {
        let mut out = Minos::new();
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                if self.bits[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise.
    ///
    /// For an m×n source the result is n×m with `result[j][m-1-i] = source[i][j]`.
    pub fn rotated_cw(&self) -> Self {
        let m = self.rows();
        let n = self.cols();
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for i in 0..m {
            for j in 0..n {
                bits[j][m - 1 - i] = self.bits[i][j];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Shape(")?;
        for y in 0..self.rows() {
            if y > 0 {
                f.write_str("/")?;
            }
            for x in 0..self.cols() {
                f.write_str(if self.bits[y][x] { "#" } else { "." })?;
            }
        }
        f.write_str(")")
    }
}

/// The seven classic tetromino templates, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Spawn-orientation picture of the template.
    pub fn picture(&self) -> &'static str {
        match self {
            PieceKind::I => "####",
            PieceKind::L => "###/#..",
            PieceKind::J => "###/..#",
            PieceKind::O => "##/##",
            PieceKind::Z => "##./.##",
            PieceKind::S => ".##/##.",
            PieceKind::T => ".#./###",
        }
    }

    pub fn shape(&self) -> Shape {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::L => &[&[1, 1, 1], &[1, 0, 0]],
            PieceKind::J => &[&[1, 1, 1], &[0, 0, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        };
        Shape::fill(rows)
    }
}

/// Ordered set of shape templates pieces are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ShapeCatalog(Vec<Shape>);

impl ShapeCatalog {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self(shapes)
    }

    /// The seven classic tetrominoes.
    pub fn classic() -> Self {
        Self(PieceKind::ALL.iter().map(PieceKind::shape).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Shape> {
        self.0.get(index).copied()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.0
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

/// A shape placed on the grid with a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: ColorIndex,
    /// Column of the matrix's left edge.
    pub x: i32,
    /// Row of the matrix's top edge (may be negative above the grid).
    pub y: i32,
}

impl Piece {
    pub fn new(shape: Shape, color: ColorIndex, x: i32, y: i32) -> Self {
        Self { shape, color, x, y }
    }

    /// Place a piece horizontally centered on row 0 of a grid `grid_width` wide.
    pub fn spawn(shape: Shape, color: ColorIndex, grid_width: usize) -> Self {
        let x = (grid_width / 2) as i32 - (shape.cols() / 2) as i32;
        Self::new(shape, color, x, 0)
    }

    pub fn width(&self) -> usize {
        self.shape.cols()
    }

    pub fn height(&self) -> usize {
        self.shape.rows()
    }

    /// Same piece with the shape rotated 90° clockwise around a fixed anchor.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Same piece shifted by (dx, dy). No bounds checking.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute (x, y) grid coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}
