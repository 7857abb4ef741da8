//! Immutable pixel geometry snapshot for a full matrix.

use crate::error::Result;
use crate::geom::{BoxSize, Point2D};
use crate::layout::AxisModel;

/// Pixel rectangle of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Top-left corner on the canvas.
    pub position: Point2D,
    /// Extent of the cell.
    pub size: BoxSize,
}

/// Absolute pixel geometry of the matrix: one axis model per axis and the
/// canvas they span together.
///
/// A geometry is constructed fresh whenever the matrix or the size
/// configuration changes and is never mutated afterwards; scroll handling
/// only ever reads from a complete snapshot.
#[derive(Debug, Clone, Default)]
pub struct MatrixGeometry {
    rows: AxisModel,
    cols: AxisModel,
}

impl MatrixGeometry {
    /// Build a geometry from two resolved axes.
    pub fn new(rows: AxisModel, cols: AxisModel) -> Self {
        Self { rows, cols }
    }

    /// A geometry with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The row axis tables.
    pub fn row_axis(&self) -> &AxisModel {
        &self.rows
    }

    /// The column axis tables.
    pub fn col_axis(&self) -> &AxisModel {
        &self.cols
    }

    /// Full pixel rectangle spanned by the matrix.
    pub fn canvas_size(&self) -> BoxSize {
        BoxSize {
            width: self.cols.total(),
            height: self.rows.total(),
        }
    }

    /// Pixel rectangle of the cell at `(row, col)`.
    ///
    /// # Errors
    /// `IndexOutOfRange` when either index is outside the matrix.
    pub fn cell_rect(&self, row: usize, col: usize) -> Result<CellRect> {
        Ok(CellRect {
            position: Point2D {
                top: self.rows.position(row)?,
                left: self.cols.position(col)?,
            },
            size: BoxSize {
                width: self.cols.size(col)?,
                height: self.rows.size(row)?,
            },
        })
    }
}
