use slat_core::{RegionId, Slot, Vec2};
use slat_layout::{LayoutModel, LayoutSnapshot};

/// Transient state for one press-drag-release gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Region the gesture started on.
    pub region: RegionId,
    /// Index of `region` when the pointer went down.
    pub dragged_index: usize,
    /// Index of `region` now. Only moves in direct swap mode.
    pub current_index: usize,
    /// Slot holding the insertion marker, placeholder mode only.
    pub placeholder_index: Option<usize>,
    /// Order and fractions at press time.
    pub original: LayoutSnapshot,
    pub press_position: Vec2,
    /// Model revision this session last agreed with.
    pub revision: u64,
}

impl DragSession {
    pub fn new(model: &LayoutModel, region: RegionId, index: usize, press_position: Vec2) -> Self {
        Self {
            region,
            dragged_index: index,
            current_index: index,
            placeholder_index: None,
            original: model.snapshot(),
            press_position,
            revision: model.revision(),
        }
    }

    pub fn original_fractions(&self) -> &[f64] {
        &self.original.fractions
    }

    /// True when the model no longer matches what this session expects:
    /// the order changed behind its back, or the dragged region moved.
    pub fn is_stale(&self, model: &LayoutModel) -> bool {
        model.revision() != self.revision
            || model.regions().get(self.current_index) != Some(&self.region)
            || self.original.regions.len() != model.len()
    }

    /// The order as it should be drawn right now, marker included.
    pub fn preview_slots(&self, model: &LayoutModel) -> Vec<Slot> {
        let mut slots: Vec<Slot> = model.regions().iter().map(|r| Slot::Region(*r)).collect();
        if let Some(index) = self.placeholder_index {
            slots.insert(index.min(slots.len()), Slot::Placeholder);
        }
        slots
    }
}
