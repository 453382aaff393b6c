// Proportional layout model (slat-layout)
// Ordered regions sharing one extent by fraction, and the projection between
// fractions and the divider positions a host draws.

mod error;
mod model;
mod projector;

pub use error::LayoutError;
pub use model::{FractionPolicy, LayoutModel, LayoutSnapshot};
pub use projector::DividerProjector;

/// Slack allowed when checking that fractions sum to 1.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Smallest share a region keeps while a single divider is dragged.
pub const DEFAULT_MIN_FRACTION: f64 = 0.05;
