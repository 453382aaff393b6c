use slat_core::{Orientation, Rect};

use crate::LayoutError;

// ──────────────────────────────────────────────
// DividerProjector: fractions <-> cumulative boundaries
// ──────────────────────────────────────────────

/// Converts between per-region fractions and the divider positions a host
/// draws between them.
pub struct DividerProjector;

impl DividerProjector {
    /// Prefix sums of every fraction but the last: `N - 1` dividers for `N`
    /// regions, nothing for zero or one region.
    pub fn fractions_to_dividers(fractions: &[f64]) -> Vec<f64> {
        let mut acc = 0.0;
        fractions
            .iter()
            .take(fractions.len().saturating_sub(1))
            .map(|f| {
                acc += f;
                acc
            })
            .collect()
    }

    /// Successive differences of the dividers, with the last region taking
    /// whatever is left up to 1.
    ///
    /// `total_extent` is the unit the dividers are expressed in: pass `1.0`
    /// for normalized positions, or the container's pixel extent when the
    /// host reports boundaries in pixels.
    pub fn dividers_to_fractions(
        dividers: &[f64],
        total_extent: f64,
    ) -> Result<Vec<f64>, LayoutError> {
        if !(total_extent > 0.0) {
            return Err(LayoutError::OutOfRange(total_extent));
        }
        let normalized: Vec<f64> = dividers.iter().map(|d| d / total_extent).collect();
        if !Self::is_strictly_increasing(&normalized) {
            return Err(LayoutError::NonMonotonicDividers);
        }

        let mut fractions = Vec::with_capacity(normalized.len() + 1);
        let mut prev = 0.0;
        for &d in &normalized {
            fractions.push(d - prev);
            prev = d;
        }
        fractions.push(1.0 - prev);
        Ok(fractions)
    }

    /// True when every divider lies strictly inside (0, 1) and each one is
    /// strictly greater than the one before.
    pub fn is_strictly_increasing(dividers: &[f64]) -> bool {
        let mut prev = 0.0;
        for &d in dividers {
            if !(d > prev) || !(d < 1.0) {
                return false;
            }
            prev = d;
        }
        true
    }

    /// Slice `bounds` along `orientation` into one rect per fraction.
    /// The last rect absorbs rounding so the rects tile `bounds` exactly.
    pub fn split_rects(bounds: Rect, orientation: Orientation, fractions: &[f64]) -> Vec<Rect> {
        let total = orientation.extent(bounds.size());
        let mut rects = Vec::with_capacity(fractions.len());
        let mut offset = 0.0_f32;
        for (i, f) in fractions.iter().enumerate() {
            let len = if i + 1 == fractions.len() {
                total - offset
            } else {
                total * *f as f32
            };
            let rect = match orientation {
                Orientation::Horizontal => {
                    Rect::new(bounds.x + offset, bounds.y, len, bounds.height)
                }
                Orientation::Vertical => {
                    Rect::new(bounds.x, bounds.y + offset, bounds.width, len)
                }
            };
            rects.push(rect);
            offset += len;
        }
        rects
    }
}
