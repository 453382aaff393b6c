// Reorder settings: how a pane reacts to drag gestures.
// Loaded by the host from its own config file; every field has a default so a
// partial or empty JSON object is valid.

use serde::{Deserialize, Serialize};
use slat_core::ReorderMode;
use slat_layout::{DEFAULT_MIN_FRACTION, DEFAULT_TOLERANCE};

/// Pixels the pointer must travel after a press before it counts as a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSettings {
    #[serde(default)]
    pub mode: ReorderMode,
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    /// Smallest fraction a divider drag may leave on either side.
    #[serde(default = "default_min_fraction")]
    pub min_fraction: f64,
    /// Allowed drift of the fraction sum away from 1.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Cancel an in-flight drag when the pointer leaves the container.
    #[serde(default)]
    pub cancel_on_exit: bool,
}

fn default_drag_threshold() -> f32 {
    DEFAULT_DRAG_THRESHOLD
}

fn default_min_fraction() -> f64 {
    DEFAULT_MIN_FRACTION
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for ReorderSettings {
    fn default() -> Self {
        Self {
            mode: ReorderMode::default(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            min_fraction: DEFAULT_MIN_FRACTION,
            tolerance: DEFAULT_TOLERANCE,
            cancel_on_exit: false,
        }
    }
}

impl ReorderSettings {
    /// Replace out-of-range values with their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            log::warn!(
                "drag_threshold {} is invalid, using {}",
                self.drag_threshold,
                DEFAULT_DRAG_THRESHOLD
            );
            self.drag_threshold = DEFAULT_DRAG_THRESHOLD;
        }
        // Positive so a dragged divider never lands on its neighbor; below
        // one half so two neighbors each keeping it fit in the pair.
        if !(self.min_fraction > 0.0 && self.min_fraction < 0.5) {
            log::warn!(
                "min_fraction {} is invalid, using {}",
                self.min_fraction,
                DEFAULT_MIN_FRACTION
            );
            self.min_fraction = DEFAULT_MIN_FRACTION;
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            log::warn!(
                "tolerance {} is invalid, using {}",
                self.tolerance,
                DEFAULT_TOLERANCE
            );
            self.tolerance = DEFAULT_TOLERANCE;
        }
        self
    }
}
