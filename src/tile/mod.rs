//! Tiling: grouping cells into render units and deciding their visibility.

mod strategy;
mod tiler;

pub use strategy::{DefaultTileRenderStrategy, TileRenderStrategy};
pub use tiler::{build_tiles, grid_extent, Cell, Tile, Visibility};
