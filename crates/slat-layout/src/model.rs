use slat_core::{Orientation, ProportionalLayout, Rect, RegionId};

use crate::{DividerProjector, LayoutError, DEFAULT_TOLERANCE};

// ──────────────────────────────────────────────
// Fraction policy for inserted regions
// ──────────────────────────────────────────────

/// How much of the extent a newly inserted region receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractionPolicy {
    /// `1 / (N + 1)` of the extent, as if every region were equal.
    EqualShare,
    /// A caller-chosen share in (0, 1).
    Exact(f64),
}

/// Order and fractions captured at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub regions: Vec<RegionId>,
    pub fractions: Vec<f64>,
}

// ──────────────────────────────────────────────
// LayoutModel
// ──────────────────────────────────────────────

/// Ordered regions sharing one extent. `fractions[i]` always describes
/// `regions[i]`; every fraction is positive and together they sum to 1.
#[derive(Debug, Clone)]
pub struct LayoutModel {
    orientation: Orientation,
    regions: Vec<RegionId>,
    fractions: Vec<f64>,
    /// Bumped on every change to the order (insert, remove, swap, move).
    revision: u64,
    tolerance: f64,
}

impl LayoutModel {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            regions: Vec::new(),
            fractions: Vec::new(),
            revision: 0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Build a model from an initial order. Without `fractions` every region
    /// gets an equal share; supplied fractions are validated and normalized.
    pub fn with_regions(
        orientation: Orientation,
        regions: Vec<RegionId>,
        fractions: Option<Vec<f64>>,
    ) -> Result<Self, LayoutError> {
        check_unique(&regions)?;
        let fractions = match fractions {
            Some(fractions) => normalized(&fractions, regions.len())?,
            None => vec![1.0 / regions.len() as f64; regions.len()],
        };
        Ok(Self {
            orientation,
            regions,
            fractions,
            revision: 0,
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Rebuild this model for another axis, keeping order and fractions.
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            revision: self.revision + 1,
            ..self
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Cumulative boundaries between adjacent regions.
    pub fn dividers(&self) -> Vec<f64> {
        DividerProjector::fractions_to_dividers(&self.fractions)
    }

    /// Pixel rect for every region when the container occupies `bounds`.
    pub fn region_rects(&self, bounds: Rect) -> Vec<(RegionId, Rect)> {
        let rects = DividerProjector::split_rects(bounds, self.orientation, &self.fractions);
        self.regions.iter().copied().zip(rects).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn position_of(&self, region: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| *r == region)
    }

    pub fn contains(&self, region: RegionId) -> bool {
        self.position_of(region).is_some()
    }

    /// True when every fraction is positive and the sum is 1 within tolerance.
    pub fn is_normalized(&self) -> bool {
        if self.fractions.is_empty() {
            return true;
        }
        let sum: f64 = self.fractions.iter().sum();
        self.fractions.iter().all(|f| *f > 0.0) && (sum - 1.0).abs() <= self.tolerance
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            regions: self.regions.clone(),
            fractions: self.fractions.clone(),
        }
    }

    /// Replace order and fractions with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> Result<(), LayoutError> {
        check_unique(&snapshot.regions)?;
        let fractions = normalized(&snapshot.fractions, snapshot.regions.len())?;
        if self.regions != snapshot.regions {
            self.revision += 1;
        }
        self.regions = snapshot.regions.clone();
        self.fractions = fractions;
        Ok(())
    }

    // ── Structural operations ───────────────────

    /// Insert `region` at `index` (0..=len). Existing fractions shrink
    /// proportionally to make room for the new region's share.
    pub fn insert(
        &mut self,
        region: RegionId,
        index: usize,
        policy: FractionPolicy,
    ) -> Result<(), LayoutError> {
        let len = self.len();
        if index > len {
            return Err(LayoutError::InvalidIndex { index, len });
        }
        if self.contains(region) {
            return Err(LayoutError::DuplicateRegion(region));
        }

        // A share of exactly 1 only fits an empty model.
        let share = match policy {
            FractionPolicy::EqualShare => 1.0 / (len + 1) as f64,
            FractionPolicy::Exact(f) if f > 0.0 && (f < 1.0 || (f == 1.0 && len == 0)) => f,
            FractionPolicy::Exact(f) => return Err(LayoutError::OutOfRange(f)),
        };

        if self.is_empty() {
            self.regions.push(region);
            self.fractions.push(1.0);
        } else {
            for f in &mut self.fractions {
                *f *= 1.0 - share;
            }
            self.regions.insert(index, region);
            self.fractions.insert(index, share);
            self.renormalize();
        }

        self.revision += 1;
        log::debug!("insert region {} at {}: {:?}", region, index, self.fractions);
        Ok(())
    }

    /// Remove the region at `index`; the others grow by `1 / (1 - removed)`.
    pub fn remove(&mut self, index: usize) -> Result<RegionId, LayoutError> {
        if self.is_empty() {
            return Err(LayoutError::EmptyModel);
        }
        self.check_index(index)?;

        let region = self.regions.remove(index);
        let removed = self.fractions.remove(index);
        if !self.fractions.is_empty() {
            // Same as scaling by 1 / (1 - removed), without trusting `removed`
            // to be exact after earlier rounding.
            let remaining: f64 = self.fractions.iter().sum();
            for f in &mut self.fractions {
                *f /= remaining;
            }
        }

        self.revision += 1;
        log::debug!(
            "remove region {} (fraction {:.4}): {:?}",
            region,
            removed,
            self.fractions
        );
        Ok(region)
    }

    /// Exchange the regions at `i` and `j`.
    ///
    /// Only the divider after the lower slot moves, by the size difference
    /// of the two regions. With `i > j` the delta `fraction[i] - fraction[j]`
    /// lands on slot `j`; with `i < j` it lands on slot `i + 1`. For
    /// neighbors both branches leave each region with its own size. For
    /// distant slots the regions in between are not shifted, so only slots
    /// `min(i, j)` and `min(i, j) + 1` change size; the swap is rejected if
    /// that would collapse one of them.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), LayoutError> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(());
        }

        let delta = self.fractions[i] - self.fractions[j];
        let mut next = self.fractions.clone();
        if i > j {
            next[j] += delta;
            next[j + 1] -= delta;
        } else {
            next[i + 1] += delta;
            next[i] -= delta;
        }
        if let Some(index) = next.iter().position(|f| *f <= 0.0) {
            return Err(LayoutError::DegenerateFraction { index });
        }

        self.regions.swap(i, j);
        self.fractions = next;
        self.revision += 1;
        log::debug!("swap {} <-> {}: {:?}", i, j, self.fractions);
        Ok(())
    }

    /// Move the region at `from` to `to`, carrying its fraction with it.
    pub fn move_region(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let region = self.regions.remove(from);
        self.regions.insert(to, region);
        let fraction = self.fractions.remove(from);
        self.fractions.insert(to, fraction);

        self.revision += 1;
        log::debug!("move region {} from {} to {}", region, from, to);
        Ok(())
    }

    // ── Fraction operations ─────────────────────

    /// Override one fraction and rescale the others so the sum stays 1.
    pub fn set_fraction(&mut self, index: usize, value: f64) -> Result<(), LayoutError> {
        self.check_index(index)?;
        if !(value > 0.0) || !value.is_finite() {
            return Err(LayoutError::OutOfRange(value));
        }
        if self.len() == 1 {
            // A lone region always owns the whole extent.
            self.fractions[0] = 1.0;
            return Ok(());
        }
        if value >= 1.0 {
            return Err(LayoutError::OutOfRange(value));
        }

        let rest: f64 = self
            .fractions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f)
            .sum();
        let scale = (1.0 - value) / rest;
        for (i, f) in self.fractions.iter_mut().enumerate() {
            if i == index {
                *f = value;
            } else {
                *f *= scale;
            }
        }
        Ok(())
    }

    /// Replace every fraction at once. Values must be positive; they are
    /// normalized to sum to 1.
    pub fn set_fractions(&mut self, fractions: &[f64]) -> Result<(), LayoutError> {
        self.fractions = normalized(fractions, self.len())?;
        Ok(())
    }

    /// Rescale all fractions so they sum to exactly 1.
    pub fn normalize(&mut self) {
        self.renormalize();
    }

    /// Apply divider positions reported by the host. A shorter slice only
    /// updates the leading dividers; the rest keep their position.
    pub fn set_divider_positions(&mut self, positions: &[f64]) -> Result<(), LayoutError> {
        let mut dividers = self.dividers();
        if positions.len() > dividers.len() {
            return Err(LayoutError::FractionCountMismatch {
                expected: dividers.len(),
                actual: positions.len(),
            });
        }
        dividers[..positions.len()].copy_from_slice(positions);
        self.fractions = DividerProjector::dividers_to_fractions(&dividers, 1.0)?;
        Ok(())
    }

    /// Drag a single divider to `position`, clamped so the two regions it
    /// separates keep at least `min_fraction` each. `min_fraction` must be
    /// positive. Returns where the divider ended up.
    pub fn drag_divider(
        &mut self,
        index: usize,
        position: f64,
        min_fraction: f64,
    ) -> Result<f64, LayoutError> {
        let mut dividers = self.dividers();
        if index >= dividers.len() {
            return Err(LayoutError::InvalidIndex {
                index,
                len: dividers.len(),
            });
        }
        if !position.is_finite() {
            return Err(LayoutError::OutOfRange(position));
        }
        // With no gap the divider could land on its neighbor.
        if !(min_fraction > 0.0) {
            return Err(LayoutError::OutOfRange(min_fraction));
        }

        let lo = if index == 0 { 0.0 } else { dividers[index - 1] } + min_fraction;
        let hi = dividers.get(index + 1).copied().unwrap_or(1.0) - min_fraction;
        // Neighbors already closer than two minimums: leave it where it is.
        let clamped = if lo > hi {
            dividers[index]
        } else {
            position.clamp(lo, hi)
        };
        dividers[index] = clamped;
        self.fractions = DividerProjector::dividers_to_fractions(&dividers, 1.0)?;
        Ok(clamped)
    }

    // ── Helpers ─────────────────────────────────

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        if index >= self.len() {
            return Err(LayoutError::InvalidIndex {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn renormalize(&mut self) {
        let sum: f64 = self.fractions.iter().sum();
        if sum > 0.0 {
            for f in &mut self.fractions {
                *f /= sum;
            }
        }
    }
}

impl ProportionalLayout for LayoutModel {
    fn orientation(&self) -> Orientation {
        LayoutModel::orientation(self)
    }

    fn regions(&self) -> &[RegionId] {
        LayoutModel::regions(self)
    }

    fn fractions(&self) -> &[f64] {
        LayoutModel::fractions(self)
    }

    fn dividers(&self) -> Vec<f64> {
        LayoutModel::dividers(self)
    }

    fn region_rects(&self, bounds: Rect) -> Vec<(RegionId, Rect)> {
        LayoutModel::region_rects(self, bounds)
    }
}

fn check_unique(regions: &[RegionId]) -> Result<(), LayoutError> {
    for (i, r) in regions.iter().enumerate() {
        if regions[..i].contains(r) {
            return Err(LayoutError::DuplicateRegion(*r));
        }
    }
    Ok(())
}

/// Validate `fractions` for a model of `len` regions and scale them to sum to 1.
fn normalized(fractions: &[f64], len: usize) -> Result<Vec<f64>, LayoutError> {
    if fractions.len() != len {
        return Err(LayoutError::FractionCountMismatch {
            expected: len,
            actual: fractions.len(),
        });
    }
    if let Some(bad) = fractions.iter().find(|f| !(**f > 0.0) || !f.is_finite()) {
        return Err(LayoutError::OutOfRange(*bad));
    }
    // Scale by the largest value first so the sum cannot overflow.
    let max = fractions.iter().copied().fold(0.0_f64, f64::max);
    let sum: f64 = fractions.iter().map(|f| f / max).sum();
    let scaled: Vec<f64> = fractions.iter().map(|f| f / max / sum).collect();
    if let Some(index) = scaled.iter().position(|f| !(*f > 0.0)) {
        return Err(LayoutError::DegenerateFraction { index });
    }
    Ok(scaled)
}
