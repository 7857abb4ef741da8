//! Structured error types for matview.
//!
//! Every error is a local precondition violation raised synchronously at the
//! call that caused it; nothing is retried internally. Hosts are expected to
//! treat these as fatal configuration errors, since there is no sensible
//! partial layout for malformed geometry.

/// All errors that can occur while building or querying a view layout.
#[derive(Debug, thiserror::Error)]
pub enum MatviewError {
    /// A row, column or tile size resolved to a negative or non-finite value.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// A size sequence or cell row does not match the expected extent.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Position or size lookup outside `[0, extent)`.
    #[error("index {index} out of range for extent {extent}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of entries on the axis.
        extent: usize,
    },

    /// Tiling was attempted before the canvas geometry was ready.
    #[error("canvas size not set")]
    MissingCanvasSize,

    /// Fixed counts on one axis sum to more than the axis extent, so the
    /// requested bands would overlap.
    #[error("fixed {axis} regions overlap: {requested} exceeds extent {extent}")]
    OverlappingFixedRegions {
        /// Which axis overlaps ("row" or "col").
        axis: &'static str,
        /// Sum of the clamped fixed counts on the axis.
        requested: usize,
        /// Number of entries on the axis.
        extent: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatviewError>;
