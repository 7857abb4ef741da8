//! Partition of the matrix index space into fixed and scrollable regions.
//!
//! The matrix splits into five disjoint regions: the four fixed bands
//! (top, bottom, left, right) and the scrollable center. Horizontal bands
//! span all columns; vertical bands span only the rows between the
//! horizontal bands. The five index rectangles always partition
//! `[0, rows) × [0, cols)` exactly.

use serde::{Deserialize, Serialize};

use crate::error::{MatviewError, Result};
use crate::geom::{BoxSides, BoxSize, Point2D, Slice};
use crate::layout::MatrixGeometry;
use crate::model::Dimension;

/// Identifies one of the five regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Rows fixed at the top edge.
    Top,
    /// Rows fixed at the bottom edge.
    Bottom,
    /// Columns fixed at the left edge.
    Left,
    /// Columns fixed at the right edge.
    Right,
    /// The scrollable body.
    Center,
}

impl RegionKind {
    /// All five kinds, fixed bands first.
    pub const ALL: [RegionKind; 5] = [
        RegionKind::Top,
        RegionKind::Bottom,
        RegionKind::Left,
        RegionKind::Right,
        RegionKind::Center,
    ];
}

/// Index slices and pixel placement of one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    /// Which region this describes.
    pub kind: RegionKind,
    /// Rows belonging to the region.
    pub row_slice: Slice,
    /// Columns belonging to the region.
    pub col_slice: Slice,
    /// Pixel footprint of the region's viewport box.
    pub pixel_size: BoxSize,
    /// Placement of the viewport box relative to the viewport origin.
    pub pixel_offset: Point2D,
    /// Canvas offset at which the region shows its trailing rows/cols when
    /// the scrollable region sits at its maximum on the relevant axis.
    /// For the center this is the maximum scroll position itself.
    pub scroll_offset: Point2D,
}

impl RegionDescriptor {
    /// Whether the region contains no cells at all.
    pub fn is_degenerate(&self) -> bool {
        self.row_slice.is_empty() || self.col_slice.is_empty()
    }
}

/// The five region descriptors of one layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSet {
    pub top: RegionDescriptor,
    pub bottom: RegionDescriptor,
    pub left: RegionDescriptor,
    pub right: RegionDescriptor,
    pub center: RegionDescriptor,
}

impl RegionSet {
    /// Descriptor for `kind`.
    pub fn get(&self, kind: RegionKind) -> &RegionDescriptor {
        match kind {
            RegionKind::Top => &self.top,
            RegionKind::Bottom => &self.bottom,
            RegionKind::Left => &self.left,
            RegionKind::Right => &self.right,
            RegionKind::Center => &self.center,
        }
    }

    /// All five descriptors, in `RegionKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionDescriptor> {
        [
            &self.top,
            &self.bottom,
            &self.left,
            &self.right,
            &self.center,
        ]
        .into_iter()
    }
}

/// Clamp requested fixed counts to the axis extents.
///
/// Clamping is per component; overlapping sums are rejected separately.
pub fn clamp_fixed(requested: BoxSides<usize>, dimension: Dimension) -> BoxSides<usize> {
    BoxSides {
        top: requested.top.min(dimension.rows),
        bottom: requested.bottom.min(dimension.rows),
        left: requested.left.min(dimension.cols),
        right: requested.right.min(dimension.cols),
    }
}

/// Split the matrix into the five regions.
///
/// `viewport_size` is `None` while the host has not measured its container
/// yet; the slices are exact regardless, only the pixel placement falls
/// back to zero until a resize arrives.
///
/// # Errors
/// `OverlappingFixedRegions` when the clamped fixed counts of one axis sum
/// to more than the axis extent.
pub fn partition(
    dimension: Dimension,
    fixed: BoxSides<usize>,
    viewport_size: Option<BoxSize>,
    geometry: &MatrixGeometry,
) -> Result<RegionSet> {
    let fixed = clamp_fixed(fixed, dimension);
    if fixed.top + fixed.bottom > dimension.rows {
        return Err(MatviewError::OverlappingFixedRegions {
            axis: "row",
            requested: fixed.top + fixed.bottom,
            extent: dimension.rows,
        });
    }
    if fixed.left + fixed.right > dimension.cols {
        return Err(MatviewError::OverlappingFixedRegions {
            axis: "col",
            requested: fixed.left + fixed.right,
            extent: dimension.cols,
        });
    }

    let viewport = viewport_size.unwrap_or_default();
    let canvas = geometry.canvas_size();

    let top_height = geometry.row_axis().leading_span(fixed.top);
    let bottom_height = geometry.row_axis().trailing_span(fixed.bottom);
    let left_width = geometry.col_axis().leading_span(fixed.left);
    let right_width = geometry.col_axis().trailing_span(fixed.right);

    // horizontal bands claim all columns; vertical bands are clipped by them
    let middle_rows = Slice::new(fixed.top, dimension.rows - fixed.bottom);
    let all_cols = Slice::new(0, dimension.cols);

    let top = RegionDescriptor {
        kind: RegionKind::Top,
        row_slice: Slice::new(0, fixed.top),
        col_slice: all_cols,
        pixel_size: BoxSize {
            width: viewport.width,
            height: top_height,
        },
        pixel_offset: Point2D::default(),
        scroll_offset: Point2D::default(),
    };

    let bottom = RegionDescriptor {
        kind: RegionKind::Bottom,
        row_slice: Slice::new(dimension.rows - fixed.bottom, dimension.rows),
        col_slice: all_cols,
        pixel_size: BoxSize {
            width: viewport.width,
            height: bottom_height,
        },
        pixel_offset: Point2D {
            top: (viewport.height - bottom_height).max(0.0),
            left: 0.0,
        },
        scroll_offset: Point2D {
            top: (canvas.height - bottom_height).max(0.0),
            left: 0.0,
        },
    };

    let left = RegionDescriptor {
        kind: RegionKind::Left,
        row_slice: middle_rows,
        col_slice: Slice::new(0, fixed.left),
        pixel_size: BoxSize {
            width: left_width,
            height: viewport.height,
        },
        pixel_offset: Point2D::default(),
        scroll_offset: Point2D::default(),
    };

    let right = RegionDescriptor {
        kind: RegionKind::Right,
        row_slice: middle_rows,
        col_slice: Slice::new(dimension.cols - fixed.right, dimension.cols),
        pixel_size: BoxSize {
            width: right_width,
            height: viewport.height,
        },
        pixel_offset: Point2D {
            top: 0.0,
            left: (viewport.width - right_width).max(0.0),
        },
        scroll_offset: Point2D {
            top: 0.0,
            left: (canvas.width - right_width).max(0.0),
        },
    };

    let center = RegionDescriptor {
        kind: RegionKind::Center,
        row_slice: middle_rows,
        col_slice: Slice::new(fixed.left, dimension.cols - fixed.right),
        pixel_size: viewport,
        pixel_offset: Point2D::default(),
        scroll_offset: Point2D {
            top: (canvas.height - viewport.height).max(0.0),
            left: (canvas.width - viewport.width).max(0.0),
        },
    };

    Ok(RegionSet {
        top,
        bottom,
        left,
        right,
        center,
    })
}
