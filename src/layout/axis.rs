//! Per-axis size and position tables.
//!
//! Positions are cumulative sums over the sizes, computed in one pass per
//! replacement. This gives O(1) position lookups and O(log n) hit testing
//! for arbitrary non-uniform sizing.

use std::cmp::Ordering;

use crate::error::{MatviewError, Result};
use crate::model::SizeProvider;

/// Size and position tables for one axis (rows or columns).
///
/// `positions[i]` is the leading pixel edge of entry `i`, with
/// `positions[0] == 0`. Positions are always rebuilt wholesale when the
/// sizes are replaced, never patched incrementally, so a stale suffix can
/// never be observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisModel {
    sizes: Vec<f32>,
    positions: Vec<f32>,
    total: f32,
}

impl AxisModel {
    /// An axis with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve `provider` against `extent` and build the position table.
    ///
    /// # Errors
    /// Propagates `SizeMismatch` / `InvalidSize` from the provider.
    pub fn from_provider(provider: &SizeProvider, extent: usize) -> Result<Self> {
        Ok(Self::from_sizes(provider.resolve(extent)?))
    }

    fn from_sizes(sizes: Vec<f32>) -> Self {
        let mut positions = Vec::with_capacity(sizes.len());
        let mut offset = 0.0_f32;
        for &size in &sizes {
            positions.push(offset);
            offset += size;
        }
        Self {
            sizes,
            positions,
            total: offset,
        }
    }

    /// Replace all sizes, keeping the extent, and recompute positions.
    ///
    /// # Errors
    /// Propagates `SizeMismatch` / `InvalidSize` from the provider.
    pub fn set_sizes(&mut self, provider: &SizeProvider) -> Result<()> {
        *self = Self::from_provider(provider, self.len())?;
        Ok(())
    }

    /// Number of entries on the axis.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the axis has no entries.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Total pixel extent of all entries together.
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Leading pixel edge of entry `index`. O(1).
    ///
    /// # Errors
    /// `IndexOutOfRange` for `index ≥ len`.
    pub fn position(&self, index: usize) -> Result<f32> {
        self.positions
            .get(index)
            .copied()
            .ok_or(MatviewError::IndexOutOfRange {
                index,
                extent: self.len(),
            })
    }

    /// Pixel size of entry `index`. O(1).
    ///
    /// # Errors
    /// `IndexOutOfRange` for `index ≥ len`.
    pub fn size(&self, index: usize) -> Result<f32> {
        self.sizes
            .get(index)
            .copied()
            .ok_or(MatviewError::IndexOutOfRange {
                index,
                extent: self.len(),
            })
    }

    /// Index of the entry containing pixel `offset` (binary search), or
    /// `None` when the axis is empty or `offset` lies outside `[0, total)`.
    pub fn index_at(&self, offset: f32) -> Option<usize> {
        if self.positions.is_empty() || offset < 0.0 || offset >= self.total {
            return None;
        }
        match self
            .positions
            .binary_search_by(|pos| pos.partial_cmp(&offset).unwrap_or(Ordering::Equal))
        {
            Ok(index) => Some(index),
            Err(index) => Some(index.saturating_sub(1)),
        }
    }

    /// Pixel extent of the first `count` entries.
    ///
    /// Used to size leading fixed bands; `count` must not exceed the axis
    /// extent (callers clamp first).
    pub fn leading_span(&self, count: usize) -> f32 {
        if count >= self.len() {
            return self.total;
        }
        self.position(count).unwrap_or(self.total)
    }

    /// Pixel extent of the last `count` entries.
    pub fn trailing_span(&self, count: usize) -> f32 {
        if count >= self.len() {
            return self.total;
        }
        self.total - self.position(self.len() - count).unwrap_or(self.total)
    }
}
