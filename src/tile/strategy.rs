//! Strategies deciding which tiles are visible for a scroll position.

use crate::geom::{BoxSize, Point2D, RowCol};

/// Decides which tiles should currently be shown.
///
/// Called once per region on every scroll tick, so implementations must be
/// fast: O(result size), never O(total tiles) and never O(cells). Bad
/// performance here degrades scroll sync for the entire view.
///
/// Implementations must be pure: same inputs, same output, no side
/// effects. Missing viewport or canvas sizes are expected during startup
/// and must yield an empty result instead of an error. Returned indices may
/// extend past the tile grid (prefetch over the edge); the synchronizer
/// ignores indices without a tile.
pub trait TileRenderStrategy {
    /// All tile indices that should currently be visible.
    fn visible_tiles(
        &self,
        scroll_position: Point2D,
        tile_size: BoxSize,
        canvas_size: Option<BoxSize>,
        viewport_size: Option<BoxSize>,
    ) -> Vec<RowCol<usize>>;
}

/// Convert a non-negative tile count to an index.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_tile_index(value: f32) -> usize {
    value.max(0.0) as usize
}

/// Default strategy: every tile intersecting the viewport plus a prefetch
/// ring of adjacent tiles.
///
/// The prefetch ring controls how many off-viewport tiles adjacent to the
/// viewport are kept materialized. Scrolling gets smoother when elements
/// already exist by the time they reach the viewport; the margin should be
/// 0 or a small number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTileRenderStrategy {
    /// Extra tile rows/cols beyond the viewport on each side.
    pub prefetch_margin: usize,
}

impl Default for DefaultTileRenderStrategy {
    fn default() -> Self {
        Self { prefetch_margin: 1 }
    }
}

impl TileRenderStrategy for DefaultTileRenderStrategy {
    fn visible_tiles(
        &self,
        scroll_position: Point2D,
        tile_size: BoxSize,
        canvas_size: Option<BoxSize>,
        viewport_size: Option<BoxSize>,
    ) -> Vec<RowCol<usize>> {
        let (Some(canvas), Some(viewport)) = (canvas_size, viewport_size) else {
            return Vec::new();
        };
        if tile_size.width <= 0.0 || tile_size.height <= 0.0 {
            return Vec::new();
        }
        let width = viewport.width.min(canvas.width);
        let height = viewport.height.min(canvas.height);

        let margin = self.prefetch_margin;
        let left =
            to_tile_index((scroll_position.left / tile_size.width).floor()).saturating_sub(margin);
        let right =
            to_tile_index(((scroll_position.left + width) / tile_size.width).ceil()) + margin;
        let top =
            to_tile_index((scroll_position.top / tile_size.height).floor()).saturating_sub(margin);
        let bottom =
            to_tile_index(((scroll_position.top + height) / tile_size.height).ceil()) + margin;

        let mut tiles = Vec::with_capacity((bottom - top) * (right - left));
        for row in top..bottom {
            for col in left..right {
                tiles.push(RowCol { row, col });
            }
        }
        tiles
    }
}
