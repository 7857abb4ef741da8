//! matview - tile virtualization for very large scrollable matrices
//!
//! A headless layout engine that renders a huge two-dimensional grid of
//! cells (hundreds of thousands of rows/cols) through a fixed-size
//! viewport:
//! - Per-row/per-col sizing resolved into cumulative pixel geometry
//! - Four independently scrolling fixed bands (top, bottom, left, right)
//!   that stay pixel-synchronized with the scrollable body
//! - Cells grouped into fixed-size tiles for incremental rendering
//! - Scroll-tick visibility decisions in O(visible tiles), never O(cells)
//!
//! The engine is presentation-agnostic: the host owns measurement, painting
//! and event wiring, and talks to the engine through the
//! [`HostEnvironment`] port, the per-region tile views and the renderer
//! registry.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use matview::{
//!     BoxSides, BoxSize, HostEnvironment, MatrixView, MatrixViewConfig, NullLog, ScrollState,
//! };
//!
//! struct Host;
//!
//! impl HostEnvironment for Host {
//!     fn container_size(&self) -> Option<BoxSize> {
//!         Some(BoxSize { width: 817.0, height: 617.0 })
//!     }
//!     fn scrollbar_width(&self) -> f32 {
//!         17.0
//!     }
//!     fn legacy_scrollbar_quirk(&self) -> bool {
//!         false
//!     }
//! }
//!
//! # fn main() -> matview::Result<()> {
//! let mut view = MatrixView::new(Box::new(Host), Arc::new(NullLog));
//! view.set_config(MatrixViewConfig {
//!     show_fixed: Some(BoxSides { top: 1, left: 1, right: 0, bottom: 0 }),
//!     ..MatrixViewConfig::default()
//! })?;
//! view.set_matrix(&vec![vec![0u32; 300]; 300])?;
//!
//! let update = view.scroll_to(ScrollState { left: 0.0, top: 0.0 });
//! assert!(!update.changed.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod log;
pub mod model;

pub mod layout;
pub mod tile;
pub mod viewer;

pub use config::{
    Config, MatrixViewConfig, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT, DEFAULT_TILE_SIZE,
};
pub use error::{MatviewError, Result};
pub use geom::{BoxCorners, BoxSides, BoxSize, Point2D, RowCol, RowsCols, Slice};
pub use layout::{
    clamp_fixed, partition, AxisModel, CellRect, MatrixGeometry, RegionDescriptor, RegionKind,
    RegionSet,
};
pub use log::{LogLevel, LogSink, NullLog, TracingLog};
pub use model::{Dimension, MatrixModel, SizeProvider};
pub use tile::{
    build_tiles, grid_extent, Cell, DefaultTileRenderStrategy, Tile, TileRenderStrategy,
    Visibility,
};
pub use viewer::{
    CornerView, HostEnvironment, MatrixView, RegionView, RendererRegistry, ScrollState,
    ScrollUpdate, TileId, TileRenderer,
};
