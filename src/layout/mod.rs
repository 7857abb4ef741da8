//! Layout engine: pixel geometry and region partitioning.
//!
//! This module handles:
//! - Pre-computing cumulative positions from row heights and column widths
//! - Deriving the canvas extent and per-cell pixel rectangles
//! - Splitting the matrix into the four fixed bands and the scrollable
//!   center, with their pixel placement inside the viewport

mod axis;
mod geometry;
mod regions;

pub use axis::AxisModel;
pub use geometry::{CellRect, MatrixGeometry};
pub use regions::{clamp_fixed, partition, RegionDescriptor, RegionKind, RegionSet};
