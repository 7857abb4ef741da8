//! Tiles: the unit of visibility and render granularity.
//!
//! Cells are grouped into fixed-size rectangular tiles so the renderer can
//! mount and unmount whole blocks instead of handling cells individually.
//! Every region tiles the same canvas-wide grid; a region only materializes
//! the tiles that actually contain cells of its slice.

use crate::error::{MatviewError, Result};
use crate::geom::{BoxSize, Point2D, RowCol, RowsCols};

/// Tile visibility life cycle.
///
/// A tile starts `Unknown` and settles to `Hidden` or `Visible` on the
/// first scroll tick; afterwards it only flips between the two. Tiles are
/// discarded (never reused) when their layout is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Not yet decided; treated as hidden until the first tick.
    #[default]
    Unknown,
    /// Outside the visible range.
    Hidden,
    /// Inside the visible range (including prefetch margin).
    Visible,
}

impl Visibility {
    /// Whether the tile should currently be mounted.
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// A single cell, fully resolved to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<V> {
    /// Position of the cell in the matrix.
    pub index: RowCol<usize>,
    /// Top-left corner on the canvas.
    pub position: Point2D,
    /// Pixel extent of the cell.
    pub size: BoxSize,
    /// The cell value.
    pub value: V,
}

/// A fixed-size rectangular group of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<V> {
    /// Position of the tile in the canvas tile grid.
    pub index: RowCol<usize>,
    /// Flat index in the canvas tile grid (`row * grid_cols + col`), used
    /// for set membership during visibility diffing.
    pub row_major_index: usize,
    /// Top-left corner on the canvas.
    pub position: Point2D,
    /// Pixel extent; boundary tiles are truncated to the canvas.
    pub size: BoxSize,
    /// The cells assigned to this tile.
    pub cells: Vec<Cell<V>>,
    /// Current visibility flag, driven by the scroll synchronizer.
    pub visibility: Visibility,
}

/// Convert a non-negative pixel quantity to a grid index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_grid_index(value: f32) -> usize {
    value.max(0.0) as usize
}

/// Number of tile rows and columns needed to cover `canvas_size`.
pub fn grid_extent(tile_size: BoxSize, canvas_size: BoxSize) -> RowsCols<usize> {
    if tile_size.width <= 0.0 || tile_size.height <= 0.0 {
        return RowsCols::default();
    }
    RowsCols {
        rows: to_grid_index((canvas_size.height / tile_size.height).ceil()),
        cols: to_grid_index((canvas_size.width / tile_size.width).ceil()),
    }
}

/// Partition `cells` into tiles over the canvas tile grid.
///
/// Boundary tiles are truncated so no tile extends past the canvas. A cell
/// is assigned to the tile containing its top-left corner; a cell spanning
/// a tile boundary therefore belongs wholly to its top-left tile. Tiles
/// that end up without any cells are discarded. The same inputs always
/// produce the same tiles and the same cell assignment.
///
/// # Errors
/// `MissingCanvasSize` when `canvas_size` is `None` (geometry not ready).
pub fn build_tiles<V>(
    cells: Vec<Cell<V>>,
    tile_size: BoxSize,
    canvas_size: Option<BoxSize>,
) -> Result<Vec<Tile<V>>> {
    let canvas = canvas_size.ok_or(MatviewError::MissingCanvasSize)?;
    let grid = grid_extent(tile_size, canvas);

    // there are m ✕ n candidate tiles (m rows and n cols)
    let mut tiles: Vec<Tile<V>> = Vec::with_capacity(grid.rows * grid.cols);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let top = tile_size.height * row as f32;
            let left = tile_size.width * col as f32;
            tiles.push(Tile {
                index: RowCol { row, col },
                row_major_index: row * grid.cols + col,
                position: Point2D { top, left },
                size: BoxSize {
                    width: tile_size.width.min(canvas.width - left),
                    height: tile_size.height.min(canvas.height - top),
                },
                cells: Vec::new(),
                visibility: Visibility::Unknown,
            });
        }
    }

    for cell in cells {
        let row = to_grid_index((cell.position.top / tile_size.height).floor());
        let col = to_grid_index((cell.position.left / tile_size.width).floor());
        if let Some(tile) = tiles.get_mut(row * grid.cols + col) {
            tile.cells.push(cell);
        }
    }

    tiles.retain(|tile| !tile.cells.is_empty());
    Ok(tiles)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;

    /// Uniform cell grid with the given cell size.
    fn uniform_cells(rows: usize, cols: usize, cell: BoxSize) -> Vec<Cell<u32>> {
        let mut cells = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    index: RowCol { row, col },
                    position: Point2D {
                        top: cell.height * row as f32,
                        left: cell.width * col as f32,
                    },
                    size: cell,
                    value: (row * cols + col) as u32,
                });
            }
        }
        cells
    }

    const TILE: BoxSize = BoxSize {
        width: 30.0,
        height: 30.0,
    };

    #[test]
    fn test_grid_extent_rounds_up() {
        let canvas = BoxSize {
            width: 200.0,
            height: 200.0,
        };
        assert_eq!(grid_extent(TILE, canvas), RowsCols { rows: 7, cols: 7 });
    }

    #[test]
    fn test_boundary_tiles_are_truncated() {
        // 10x10 cells of 20x20 px => 200x200 canvas, 7x7 tile grid
        let canvas = BoxSize {
            width: 200.0,
            height: 200.0,
        };
        let cells = uniform_cells(
            10,
            10,
            BoxSize {
                width: 20.0,
                height: 20.0,
            },
        );
        let tiles = build_tiles(cells, TILE, Some(canvas)).unwrap();

        for tile in &tiles {
            if tile.index.col == 6 {
                assert_eq!(tile.size.width, 20.0, "last column is 200 - 6*30");
            } else {
                assert_eq!(tile.size.width, 30.0);
            }
            if tile.index.row == 6 {
                assert_eq!(tile.size.height, 20.0);
            } else {
                assert_eq!(tile.size.height, 30.0);
            }
        }
    }

    #[test]
    fn test_every_cell_in_exactly_one_tile() {
        let canvas = BoxSize {
            width: 200.0,
            height: 200.0,
        };
        let cells = uniform_cells(
            10,
            10,
            BoxSize {
                width: 20.0,
                height: 20.0,
            },
        );
        let tiles = build_tiles(cells, TILE, Some(canvas)).unwrap();

        let mut seen = std::collections::HashSet::new();
        for tile in &tiles {
            assert!(!tile.cells.is_empty(), "empty tiles must be discarded");
            for cell in &tile.cells {
                assert!(seen.insert(cell.index), "cell assigned twice");
            }
        }
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_spanning_cell_goes_to_top_left_tile() {
        // one 50x50 cell starting at 20,20 spans the tile boundary at 30
        let cells = vec![Cell {
            index: RowCol { row: 0, col: 0 },
            position: Point2D {
                top: 20.0,
                left: 20.0,
            },
            size: BoxSize {
                width: 50.0,
                height: 50.0,
            },
            value: 0u32,
        }];
        let canvas = BoxSize {
            width: 70.0,
            height: 70.0,
        };
        let tiles = build_tiles(cells, TILE, Some(canvas)).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].index, RowCol { row: 0, col: 0 });
    }

    #[test]
    fn test_missing_canvas_size() {
        let result = build_tiles(uniform_cells(1, 1, TILE), TILE, None);
        assert!(matches!(result, Err(MatviewError::MissingCanvasSize)));
    }

    #[test]
    fn test_deterministic() {
        let canvas = BoxSize {
            width: 200.0,
            height: 200.0,
        };
        let cell = BoxSize {
            width: 20.0,
            height: 20.0,
        };
        let first = build_tiles(uniform_cells(5, 5, cell), TILE, Some(canvas)).unwrap();
        let second = build_tiles(uniform_cells(5, 5, cell), TILE, Some(canvas)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_tiles_start_unknown() {
        let canvas = BoxSize {
            width: 40.0,
            height: 40.0,
        };
        let cell = BoxSize {
            width: 20.0,
            height: 20.0,
        };
        let tiles = build_tiles(uniform_cells(2, 2, cell), TILE, Some(canvas)).unwrap();
        assert!(tiles
            .iter()
            .all(|tile| tile.visibility == Visibility::Unknown));
        assert!(!Visibility::Unknown.is_visible());
    }
}
