//! Tiling tests.
//!
//! Every cell lands in exactly one tile, boundary tiles are truncated and
//! the tile set is deterministic.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashSet;

use matview::{build_tiles, grid_extent, BoxSize, Cell, MatviewError, Point2D, RowCol, RowsCols};
use proptest::prelude::*;

fn uniform_cells(rows: usize, cols: usize, cell_size: f32) -> Vec<Cell<usize>> {
    let mut cells = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            cells.push(Cell {
                index: RowCol { row, col },
                position: Point2D {
                    top: cell_size * row as f32,
                    left: cell_size * col as f32,
                },
                size: BoxSize {
                    width: cell_size,
                    height: cell_size,
                },
                value: row * cols + col,
            });
        }
    }
    cells
}

fn square(size: f32) -> BoxSize {
    BoxSize {
        width: size,
        height: size,
    }
}

// ============================================================================
// Scenario: 10x10 matrix, 20px cells, 30px tiles
// ============================================================================

#[test]
fn test_grid_is_seven_by_seven() {
    assert_eq!(
        grid_extent(square(30.0), square(200.0)),
        RowsCols { rows: 7, cols: 7 }
    );
}

#[test]
fn test_corner_tiles_truncated_to_twenty() {
    let tiles = build_tiles(uniform_cells(10, 10, 20.0), square(30.0), Some(square(200.0)))
        .unwrap();

    let last = tiles
        .iter()
        .find(|tile| tile.index == RowCol { row: 6, col: 6 })
        .expect("corner tile must exist");
    assert_eq!(last.size, square(20.0), "200 - 6 * 30");

    let inner = tiles
        .iter()
        .find(|tile| tile.index == RowCol { row: 3, col: 6 })
        .expect("edge tile must exist");
    assert_eq!(inner.size.height, 30.0);
    assert_eq!(inner.size.width, 20.0);
}

#[test]
fn test_row_major_indices_follow_grid() {
    let tiles = build_tiles(uniform_cells(10, 10, 20.0), square(30.0), Some(square(200.0)))
        .unwrap();
    for tile in &tiles {
        assert_eq!(tile.row_major_index, tile.index.row * 7 + tile.index.col);
    }
}

// ============================================================================
// Assignment rules
// ============================================================================

#[test]
fn test_boundary_spanning_cell_assigned_to_top_left_tile() {
    // cell starts inside tile (0,0) but spans into (0,1) and (1,0)
    let cells = vec![Cell {
        index: RowCol { row: 0, col: 0 },
        position: Point2D {
            top: 25.0,
            left: 25.0,
        },
        size: square(20.0),
        value: 7usize,
    }];
    let tiles = build_tiles(cells, square(30.0), Some(square(90.0))).unwrap();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].index, RowCol { row: 0, col: 0 });
}

#[test]
fn test_empty_tiles_are_dropped() {
    // a single cell in a 4-tile canvas leaves three tiles empty
    let cells = uniform_cells(1, 1, 20.0);
    let tiles = build_tiles(cells, square(30.0), Some(square(60.0))).unwrap();
    assert_eq!(tiles.len(), 1);
}

#[test]
fn test_missing_canvas_size_errors() {
    let result = build_tiles(uniform_cells(2, 2, 20.0), square(30.0), None);
    assert!(matches!(result, Err(MatviewError::MissingCanvasSize)));
}

#[test]
fn test_same_inputs_same_tiles() {
    let first =
        build_tiles(uniform_cells(6, 9, 20.0), square(50.0), Some(square(180.0))).unwrap();
    let second =
        build_tiles(uniform_cells(6, 9, 20.0), square(50.0), Some(square(180.0))).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Tiling partition property
// ============================================================================

proptest! {
    /// Every cell appears in exactly one tile and no tile is empty, for
    /// arbitrary matrix extents, cell sizes and tile sizes.
    #[test]
    fn prop_every_cell_in_exactly_one_tile(
        rows in 1usize..16,
        cols in 1usize..16,
        cell_px in 1u32..50,
        tile_px in 1u32..200,
    ) {
        let cell_size = cell_px as f32;
        let tile = square(tile_px as f32);
        let canvas = BoxSize {
            width: cell_size * cols as f32,
            height: cell_size * rows as f32,
        };
        let tiles = build_tiles(uniform_cells(rows, cols, cell_size), tile, Some(canvas)).unwrap();

        let mut seen = HashSet::new();
        for tile in &tiles {
            prop_assert!(!tile.cells.is_empty(), "empty tile survived");
            for cell in &tile.cells {
                prop_assert!(seen.insert(cell.index), "cell assigned twice");
            }
        }
        prop_assert_eq!(seen.len(), rows * cols);
    }

    /// No tile extends past the canvas.
    #[test]
    fn prop_tiles_stay_inside_canvas(
        rows in 1usize..16,
        cols in 1usize..16,
        tile_px in 1u32..100,
    ) {
        let tile = square(tile_px as f32);
        let canvas = BoxSize {
            width: 20.0 * cols as f32,
            height: 20.0 * rows as f32,
        };
        let tiles = build_tiles(uniform_cells(rows, cols, 20.0), tile, Some(canvas)).unwrap();
        for tile in &tiles {
            prop_assert!(tile.position.left + tile.size.width <= canvas.width);
            prop_assert!(tile.position.top + tile.size.height <= canvas.height);
            prop_assert!(tile.size.width > 0.0);
            prop_assert!(tile.size.height > 0.0);
        }
    }
}
