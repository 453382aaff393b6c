//! Error types for layout model operations.
//!
//! Every fallible operation on [`LayoutModel`](crate::LayoutModel) is
//! all-or-nothing: when one of these is returned the model is untouched.

use slat_core::RegionId;

/// Errors that can occur while mutating a layout model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Index argument outside the current bounds.
    #[error("index {index} out of range for {len} regions")]
    InvalidIndex { index: usize, len: usize },

    /// The operation needs at least one region.
    #[error("layout has no regions")]
    EmptyModel,

    /// A fraction or divider value outside its legal range.
    #[error("value out of range: {0}")]
    OutOfRange(f64),

    /// A fraction or divider sequence of the wrong length.
    #[error("expected {expected} values, got {actual}")]
    FractionCountMismatch { expected: usize, actual: usize },

    /// Divider positions must be strictly increasing inside (0, 1).
    #[error("divider positions are not strictly increasing inside (0, 1)")]
    NonMonotonicDividers,

    /// The operation would leave the region at `index` with no extent.
    #[error("operation would collapse region at index {index}")]
    DegenerateFraction { index: usize },

    /// A region handle may occupy only one slot.
    #[error("region {0} is already in the layout")]
    DuplicateRegion(RegionId),
}
