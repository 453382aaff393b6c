// ReorderablePane: the host-facing surface. Owns the layout model, the
// coordinate mapper and the drag controller, and queues LayoutEvents for the
// host to drain after each call.

use slat_core::{
    CursorHint, LayoutEvent, Orientation, Rect, RegionId, ReorderMode, Size, Slot, Transform, Vec2,
};
use slat_layout::{FractionPolicy, LayoutError, LayoutModel};

use crate::controller::emit_layout;
use crate::{CoordinateMapper, DragController, GestureState, ReorderSettings, SampleOutcome};

pub struct ReorderablePane {
    model: LayoutModel,
    mapper: CoordinateMapper,
    controller: DragController,
    settings: ReorderSettings,
    events: Vec<LayoutEvent>,
}

impl ReorderablePane {
    pub fn new(orientation: Orientation, settings: ReorderSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            model: LayoutModel::new(orientation).with_tolerance(settings.tolerance),
            mapper: CoordinateMapper::new(orientation),
            controller: DragController::new(settings.mode, settings.drag_threshold),
            settings,
            events: Vec::new(),
        }
    }

    // ── Lifecycle ───────────────────────────────

    /// Replace the managed regions. Any gesture in flight is cancelled first.
    pub fn attach(
        &mut self,
        regions: Vec<RegionId>,
        fractions: Option<Vec<f64>>,
    ) -> Result<(), LayoutError> {
        let model = LayoutModel::with_regions(self.model.orientation(), regions, fractions)?
            .with_tolerance(self.settings.tolerance);
        self.controller.cancel(&mut self.model, &mut self.events);
        self.model = model;
        emit_layout(&self.model, true, &mut self.events);
        log::debug!("attached {} regions", self.model.len());
        Ok(())
    }

    /// Drop every region and forget any gesture.
    pub fn detach(&mut self) {
        self.controller.cancel(&mut self.model, &mut self.events);
        self.model = LayoutModel::new(self.model.orientation()).with_tolerance(self.settings.tolerance);
        emit_layout(&self.model, true, &mut self.events);
    }

    // ── Accessors ───────────────────────────────

    pub fn model(&self) -> &LayoutModel {
        &self.model
    }

    pub fn settings(&self) -> &ReorderSettings {
        &self.settings
    }

    pub fn mode(&self) -> ReorderMode {
        self.controller.mode()
    }

    /// Switch reorder strategy. Refused while a gesture is in flight.
    pub fn set_mode(&mut self, mode: ReorderMode) -> bool {
        let changed = self.controller.set_mode(mode);
        if changed {
            self.settings.mode = mode;
        }
        changed
    }

    pub fn gesture_state(&self) -> &GestureState {
        self.controller.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.state().is_dragging()
    }

    pub fn get_divider_positions(&self) -> Vec<f64> {
        self.model.dividers()
    }

    pub fn region_rects(&self, bounds: Rect) -> Vec<(RegionId, Rect)> {
        self.model.region_rects(bounds)
    }

    /// Hit-test a pointer position against the current region rectangles.
    /// Positions on a shared edge go to the leading region.
    pub fn region_at(&self, x: f32, y: f32) -> Option<RegionId> {
        if self.mapper.is_degenerate() {
            return None;
        }
        let local = self.mapper.to_local(Vec2::new(x, y))?;
        let extent = self.mapper.extent();
        let bounds = Rect::new(0.0, 0.0, extent.width, extent.height);
        self.model
            .region_rects(bounds)
            .into_iter()
            .find(|(_, rect)| rect.contains(local))
            .map(|(region, _)| region)
    }

    pub fn preview_slots(&self) -> Vec<Slot> {
        self.controller.preview_slots(&self.model)
    }

    // ── Container geometry ──────────────────────

    pub fn set_container_extent(&mut self, width: f32, height: f32) {
        self.mapper.set_extent(Size::new(width, height));
    }

    /// Transform from container-local space into the space pointer events
    /// are reported in.
    pub fn set_container_transform(&mut self, transform: Transform) {
        self.mapper.set_transform(transform);
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.model.orientation() {
            return;
        }
        self.controller.cancel(&mut self.model, &mut self.events);
        self.model = self.model.clone().with_orientation(orientation);
        self.mapper.set_orientation(orientation);
    }

    // ── Pointer input ───────────────────────────

    pub fn on_pointer_down(&mut self, region: RegionId, x: f32, y: f32) -> bool {
        self.controller.press(&self.model, region, Vec2::new(x, y))
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> SampleOutcome {
        self.controller
            .sample(&mut self.model, &self.mapper, Vec2::new(x, y), &mut self.events)
    }

    /// Release coordinates are not evaluated; the last move sample decides.
    pub fn on_pointer_up(&mut self, _x: f32, _y: f32) -> bool {
        self.controller.release(&mut self.model, &mut self.events)
    }

    pub fn on_pointer_exit(&mut self) {
        if self.settings.cancel_on_exit && !self.controller.state().is_idle() {
            self.controller.cancel(&mut self.model, &mut self.events);
        } else if !self.controller.state().is_dragging() {
            self.events.push(LayoutEvent::CursorChanged(CursorHint::Default));
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.controller.cancel(&mut self.model, &mut self.events)
    }

    // ── Layout operations ───────────────────────

    pub fn insert_region(
        &mut self,
        region: RegionId,
        index: usize,
        policy: FractionPolicy,
    ) -> Result<(), LayoutError> {
        self.model.insert(region, index, policy)?;
        emit_layout(&self.model, true, &mut self.events);
        Ok(())
    }

    pub fn remove_region(&mut self, index: usize) -> Result<RegionId, LayoutError> {
        let region = self.model.remove(index)?;
        emit_layout(&self.model, true, &mut self.events);
        Ok(region)
    }

    pub fn set_fraction(&mut self, index: usize, value: f64) -> Result<(), LayoutError> {
        self.model.set_fraction(index, value)?;
        emit_layout(&self.model, false, &mut self.events);
        Ok(())
    }

    pub fn set_divider_positions(&mut self, positions: &[f64]) -> Result<(), LayoutError> {
        self.model.set_divider_positions(positions)?;
        emit_layout(&self.model, false, &mut self.events);
        Ok(())
    }

    /// Drag one divider, keeping `min_fraction` from the settings on both
    /// sides. Returns the divider's final position.
    pub fn drag_divider(&mut self, index: usize, position: f64) -> Result<f64, LayoutError> {
        let placed = self
            .model
            .drag_divider(index, position, self.settings.min_fraction)?;
        emit_layout(&self.model, false, &mut self.events);
        Ok(placed)
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }
}
