//! Grid tests - collision, locking and line clearing through the public API

use blockfall::core::{Grid, Piece, PieceKind, Shape};
use blockfall::types::{ColorIndex, GRID_HEIGHT, GRID_WIDTH};

const W: usize = GRID_WIDTH as usize;
const H: usize = GRID_HEIGHT as usize;

fn color(i: u8) -> Option<ColorIndex> {
    Some(ColorIndex::new(i))
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(W, H);
    assert_eq!(grid.width(), W);
    assert_eq!(grid.height(), H);

    for y in 0..H as i32 {
        for x in 0..W as i32 {
            assert!(grid.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(grid.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(W, H);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(W as i32, 0), None);
    assert_eq!(grid.get(0, H as i32), None);
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(W, H);
    assert!(grid.set(5, 10, color(6)));
    assert_eq!(grid.get(5, 10), Some(color(6)));
    assert!(!grid.set(-1, 10, color(6)));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_collision_with_walls_floor_and_stack() {
    let mut grid = Grid::new(W, H);
    let i = PieceKind::I.shape();

    assert!(!grid.collides(&Piece::new(i, ColorIndex::new(0), 0, 0)));
    assert!(!grid.collides(&Piece::new(i, ColorIndex::new(0), 6, 19)));
    assert!(grid.collides(&Piece::new(i, ColorIndex::new(0), -1, 0)));
    assert!(grid.collides(&Piece::new(i, ColorIndex::new(0), 7, 0)));
    assert!(grid.collides(&Piece::new(i, ColorIndex::new(0), 0, 20)));

    // Rows above the top are free space
    assert!(!grid.collides(&Piece::new(i, ColorIndex::new(0), 3, -2)));

    grid.set(4, 5, color(1));
    assert!(grid.collides(&Piece::new(i, ColorIndex::new(0), 3, 5)));
    assert!(!grid.collides(&Piece::new(i, ColorIndex::new(0), 5, 5)));
}

#[test]
fn test_lock_drops_cells_above_top() {
    let mut grid = Grid::new(W, H);
    let t = Piece::new(PieceKind::T.shape(), ColorIndex::new(5), 2, -1);
    assert_eq!(grid.lock(&t), 3);
    for x in 2..5 {
        assert_eq!(grid.get(x, 0), Some(color(5)));
    }
    assert_eq!(grid.occupied_count(), 3);
}

#[test]
fn test_clear_row_shifts_rows_above() {
    let mut grid = Grid::new(W, H);
    grid.set(0, 17, color(2));
    grid.fill_row_except(18, &[]);
    grid.set(9, 19, color(3));

    grid.clear_row(18);

    assert_eq!(grid.get(0, 18), Some(color(2)));
    assert_eq!(grid.get(0, 17), Some(None));
    assert_eq!(grid.get(9, 19), Some(color(3)));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_clear_full_rows_counts_every_full_row() {
    let mut grid = Grid::new(W, H);
    for y in [12, 15, 16, 19] {
        grid.fill_row_except(y, &[]);
    }
    grid.fill_row_except(17, &[4]);
    grid.set(2, 11, color(1));

    assert_eq!(grid.clear_full_rows(), 4);

    // The partial row and the lone cell each sank by the rows cleared below them
    assert!(grid.row(18).iter().filter(|c| c.is_some()).count() == W - 1);
    assert_eq!(grid.get(2, 15), Some(color(1)));
    assert_eq!(grid.occupied_count(), W - 1 + 1);
    assert!(!grid.is_row_occupied(0));
}

#[test]
fn test_clear_every_row() {
    let mut grid = Grid::new(4, 4);
    for y in 0..4 {
        grid.fill_row_except(y, &[]);
    }
    assert_eq!(grid.clear_full_rows(), 4);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_u8_encoding() {
    let mut grid = Grid::new(4, 4);
    grid.set(0, 0, color(0));
    grid.set(3, 3, color(6));
    let mut out = Vec::new();
    grid.write_u8_cells(&mut out);
    assert_eq!(out.len(), 16);
    assert_eq!(out[0], 1);
    assert_eq!(out[15], 7);
    assert_eq!(out.iter().filter(|&&v| v == 0).count(), 14);
}

#[test]
fn test_custom_shape_on_small_grid() {
    let grid = Grid::new(5, 6);
    let bar = Shape::parse("#/#/#/#").unwrap();
    assert!(!grid.collides(&Piece::new(bar, ColorIndex::new(0), 4, 2)));
    assert!(grid.collides(&Piece::new(bar, ColorIndex::new(0), 4, 3)));
    assert!(grid.collides(&Piece::new(bar, ColorIndex::new(0), 5, 0)));
}
