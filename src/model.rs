//! Matrix model: cell values and per-axis size providers.

use std::fmt;

use crate::error::{MatviewError, Result};
use crate::geom::RowsCols;

/// Logical matrix extent.
pub type Dimension = RowsCols<usize>;

/// Source of per-row or per-column sizes.
///
/// Sizes can be defined as a single number for all indices, as one size per
/// index, or as a function mapping each index to a size. The function form
/// is helpful to define e.g. two different sizes, one for a header row and
/// one for all others:
///
/// ```
/// use matview::SizeProvider;
///
/// let heights = SizeProvider::Function(Box::new(|index| {
///     if index == 0 { 25.0 } else { 20.0 }
/// }));
/// assert_eq!(heights.resolve(3).unwrap(), vec![25.0, 20.0, 20.0]);
/// ```
pub enum SizeProvider {
    /// Every index gets the same size.
    Constant(f32),
    /// One size per index; the sequence length must match the axis extent.
    PerIndex(Vec<f32>),
    /// Size computed per index.
    Function(Box<dyn Fn(usize) -> f32>),
}

impl fmt::Debug for SizeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(size) => f.debug_tuple("Constant").field(size).finish(),
            Self::PerIndex(sizes) => f.debug_tuple("PerIndex").field(&sizes.len()).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl SizeProvider {
    /// Resolve to a size array of exactly `extent` entries.
    ///
    /// # Errors
    /// `SizeMismatch` if a per-index sequence does not have `extent`
    /// entries; `InvalidSize` if any resolved size is negative or
    /// non-finite.
    pub fn resolve(&self, extent: usize) -> Result<Vec<f32>> {
        let sizes = match self {
            Self::Constant(size) => vec![*size; extent],
            Self::PerIndex(sizes) => {
                if sizes.len() != extent {
                    return Err(MatviewError::SizeMismatch(format!(
                        "size sequence has {} entries, axis extent is {extent}",
                        sizes.len()
                    )));
                }
                sizes.clone()
            }
            Self::Function(provider) => (0..extent).map(provider).collect(),
        };
        for (index, &size) in sizes.iter().enumerate() {
            if !size.is_finite() || size < 0.0 {
                return Err(MatviewError::InvalidSize(format!(
                    "size {size} at index {index}"
                )));
            }
        }
        Ok(sizes)
    }
}

/// The cell values of the matrix.
///
/// The matrix is treated as immutable: incoming cells are copied, so later
/// external mutation cannot corrupt a geometry snapshot in use. Replacing
/// the cells is a structural change that invalidates all derived layout.
#[derive(Debug, Clone, Default)]
pub struct MatrixModel<V> {
    cells: Vec<Vec<V>>,
    dimension: Dimension,
}

impl<V: Clone> MatrixModel<V> {
    /// An empty 0×0 model.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            dimension: Dimension::default(),
        }
    }

    /// Replace the cell matrix with a copy of `cells`.
    ///
    /// # Errors
    /// `SizeMismatch` if the rows are ragged (every row must have as many
    /// entries as the first).
    pub fn set_cells(&mut self, cells: &[Vec<V>]) -> Result<()> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        for (index, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(MatviewError::SizeMismatch(format!(
                    "row {index} has {} cols, expected {cols}",
                    row.len()
                )));
            }
        }
        self.cells = cells.to_vec();
        self.dimension = Dimension { rows, cols };
        Ok(())
    }

    /// Logical extent of the matrix.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// All cell rows.
    pub fn cells(&self) -> &[Vec<V>] {
        &self.cells
    }

    /// Value at `(row, col)`, if inside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<&V> {
        self.cells.get(row).and_then(|cells| cells.get(col))
    }

    /// Whether the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.dimension.rows == 0 || self.dimension.cols == 0
    }
}
