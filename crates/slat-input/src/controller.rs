use std::mem;

use slat_core::{CursorHint, GestureAbort, LayoutEvent, RegionId, ReorderMode, Slot, Vec2};
use slat_layout::{LayoutError, LayoutModel};

use crate::{strategy_for, CoordinateMapper, DragSession, MutationCommand, ReorderStrategy};

// ──────────────────────────────────────────────
// Gesture state machine
// ──────────────────────────────────────────────

/// Where the current gesture is. Only one session can exist at a time.
#[derive(Debug, Clone)]
pub enum GestureState {
    Idle,
    /// Pointer is down on a region but has not moved far enough to be a drag.
    PressedOnRegion(DragSession),
    Dragging(DragSession),
    /// Pointer released; the strategy's final change is being applied.
    CommitPending(DragSession),
}

impl GestureState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            GestureState::Idle => None,
            GestureState::PressedOnRegion(s)
            | GestureState::Dragging(s)
            | GestureState::CommitPending(s) => Some(s),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }
}

/// What one pointer-move sample did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// No gesture, or the sample had no usable position.
    Ignored,
    /// Pressed, still under the drag threshold.
    Pending,
    /// Evaluated, nothing to change.
    Unchanged,
    /// The model order changed.
    Reordered,
    /// The insertion marker moved to this slot.
    PreviewMoved(usize),
    Aborted(GestureAbort),
}

// ──────────────────────────────────────────────
// DragController
// ──────────────────────────────────────────────

/// Drives one gesture at a time against a layout model, delegating the
/// reorder decision to a [`ReorderStrategy`].
pub struct DragController {
    state: GestureState,
    strategy: Box<dyn ReorderStrategy>,
    /// Pixels the pointer must travel before a press becomes a drag.
    drag_threshold: f32,
}

impl DragController {
    pub fn new(mode: ReorderMode, drag_threshold: f32) -> Self {
        Self::with_strategy(strategy_for(mode), drag_threshold)
    }

    pub fn with_strategy(strategy: Box<dyn ReorderStrategy>, drag_threshold: f32) -> Self {
        Self {
            state: GestureState::Idle,
            strategy,
            drag_threshold,
        }
    }

    pub fn mode(&self) -> ReorderMode {
        self.strategy.mode()
    }

    /// Switch strategy. Refused while a gesture is in flight.
    pub fn set_mode(&mut self, mode: ReorderMode) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        self.strategy = strategy_for(mode);
        true
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Pointer went down on `region`. Returns false when the press is ignored:
    /// a gesture is already active, or the region is not in the model.
    pub fn press(&mut self, model: &LayoutModel, region: RegionId, pointer: Vec2) -> bool {
        if !self.state.is_idle() {
            log::trace!("press on region {} ignored: gesture already active", region);
            return false;
        }
        let Some(index) = model.position_of(region) else {
            log::warn!("press on unknown region {}", region);
            return false;
        };
        self.state = GestureState::PressedOnRegion(DragSession::new(model, region, index, pointer));
        true
    }

    /// Feed one pointer-move sample. Any change it causes is fully applied
    /// before this returns.
    pub fn sample(
        &mut self,
        model: &mut LayoutModel,
        mapper: &CoordinateMapper,
        pointer: Vec2,
        events: &mut Vec<LayoutEvent>,
    ) -> SampleOutcome {
        let mut session = match mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => return SampleOutcome::Ignored,
            GestureState::PressedOnRegion(session) => {
                if session.press_position.distance(pointer) < self.drag_threshold {
                    self.state = GestureState::PressedOnRegion(session);
                    return SampleOutcome::Pending;
                }
                if session.is_stale(model) {
                    return self.abort(session, false, events);
                }
                log::debug!(
                    "drag started on region {} at index {}",
                    session.region,
                    session.dragged_index
                );
                events.push(LayoutEvent::CursorChanged(CursorHint::Grabbing));
                session
            }
            GestureState::Dragging(session) => session,
            state @ GestureState::CommitPending(_) => {
                self.state = state;
                return SampleOutcome::Ignored;
            }
        };

        if session.is_stale(model) {
            return self.abort(session, true, events);
        }

        let Some(position) = mapper.to_normalized_position(pointer) else {
            log::trace!("sample ignored: container has no extent");
            self.state = GestureState::Dragging(session);
            return SampleOutcome::Ignored;
        };

        let outcome = match self.strategy.on_sample(&mut session, model, position) {
            None => SampleOutcome::Unchanged,
            Some(command) => {
                log::trace!("sample {:.4}: {:?}", position, command);
                match apply(command, model, events) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        log::warn!("reorder rejected, aborting gesture: {}", e);
                        return self.abort(session, true, events);
                    }
                }
            }
        };

        session.revision = model.revision();
        self.state = GestureState::Dragging(session);
        outcome
    }

    /// Pointer went up. Returns true when the release itself moved a region.
    pub fn release(&mut self, model: &mut LayoutModel, events: &mut Vec<LayoutEvent>) -> bool {
        let session = match mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging(session) => session,
            GestureState::PressedOnRegion(session) => {
                log::trace!("click on region {}", session.region);
                return false;
            }
            state => {
                self.state = state;
                return false;
            }
        };
        self.state = GestureState::CommitPending(session);
        self.commit(model, events)
    }

    /// Abort the gesture and put the layout back the way it was at press
    /// time. Returns false when there was nothing to cancel.
    pub fn cancel(&mut self, model: &mut LayoutModel, events: &mut Vec<LayoutEvent>) -> bool {
        let (session, dragging) = match mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => return false,
            GestureState::PressedOnRegion(session) => (session, false),
            GestureState::Dragging(session) | GestureState::CommitPending(session) => {
                (session, true)
            }
        };

        if session.placeholder_index.is_some() {
            events.push(LayoutEvent::PlaceholderMoved(None));
        }
        // Only undo our own swaps; a foreign change means the snapshot is stale.
        let untouched_since_last_sample = model.revision() == session.revision;
        if untouched_since_last_sample && model.snapshot() != session.original {
            let order_changed = model.regions() != session.original.regions.as_slice();
            match model.restore(&session.original) {
                Ok(()) => emit_layout(model, order_changed, events),
                Err(e) => log::warn!("could not restore pre-drag layout: {}", e),
            }
        }
        if dragging {
            events.push(LayoutEvent::CursorChanged(CursorHint::Default));
        }
        events.push(LayoutEvent::GestureAborted(GestureAbort::Cancelled));
        log::debug!("gesture on region {} cancelled", session.region);
        true
    }

    /// The order as the host should draw it, including the insertion marker.
    pub fn preview_slots(&self, model: &LayoutModel) -> Vec<Slot> {
        match &self.state {
            GestureState::Dragging(session) => session.preview_slots(model),
            _ => model.regions().iter().map(|r| Slot::Region(*r)).collect(),
        }
    }

    fn commit(&mut self, model: &mut LayoutModel, events: &mut Vec<LayoutEvent>) -> bool {
        let GestureState::CommitPending(mut session) = mem::replace(&mut self.state, GestureState::Idle)
        else {
            return false;
        };

        let had_placeholder = session.placeholder_index.is_some();
        let stale = session.is_stale(model);
        let command = if stale {
            None
        } else {
            self.strategy.on_release(&mut session, model)
        };

        if had_placeholder {
            events.push(LayoutEvent::PlaceholderMoved(None));
        }
        events.push(LayoutEvent::CursorChanged(CursorHint::Default));

        if stale {
            log::warn!("release on region {} ignored: layout changed mid-drag", session.region);
            events.push(LayoutEvent::GestureAborted(GestureAbort::StaleGestureState));
            return false;
        }

        match command {
            None => false,
            Some(command) => match apply(command, model, events) {
                Ok(outcome) => outcome == SampleOutcome::Reordered,
                Err(e) => {
                    log::warn!("release rejected: {}", e);
                    events.push(LayoutEvent::GestureAborted(GestureAbort::StaleGestureState));
                    false
                }
            },
        }
    }

    /// Drop a gesture whose model changed underneath it. Swaps already
    /// applied stay in place along with the foreign change; nothing snaps back.
    fn abort(
        &mut self,
        session: DragSession,
        dragging: bool,
        events: &mut Vec<LayoutEvent>,
    ) -> SampleOutcome {
        log::warn!(
            "gesture on region {} aborted: layout changed mid-drag",
            session.region
        );
        if session.placeholder_index.is_some() {
            events.push(LayoutEvent::PlaceholderMoved(None));
        }
        if dragging {
            events.push(LayoutEvent::CursorChanged(CursorHint::Default));
        }
        events.push(LayoutEvent::GestureAborted(GestureAbort::StaleGestureState));
        self.state = GestureState::Idle;
        SampleOutcome::Aborted(GestureAbort::StaleGestureState)
    }
}

/// Apply a strategy command to the model, all or nothing.
fn apply(
    command: MutationCommand,
    model: &mut LayoutModel,
    events: &mut Vec<LayoutEvent>,
) -> Result<SampleOutcome, LayoutError> {
    match command {
        MutationCommand::Swap { from, to } => {
            model.swap(from, to)?;
            emit_layout(model, true, events);
            Ok(SampleOutcome::Reordered)
        }
        MutationCommand::ShowPlaceholder { slot } => {
            events.push(LayoutEvent::PlaceholderMoved(Some(slot)));
            Ok(SampleOutcome::PreviewMoved(slot))
        }
        MutationCommand::Move {
            from,
            to,
            fractions,
        } => {
            let mut next = model.clone();
            next.move_region(from, to)?;
            next.set_fractions(&fractions)?;
            *model = next;
            emit_layout(model, true, events);
            Ok(SampleOutcome::Reordered)
        }
    }
}

pub(crate) fn emit_layout(model: &LayoutModel, order_changed: bool, events: &mut Vec<LayoutEvent>) {
    if order_changed {
        events.push(LayoutEvent::OrderChanged(model.regions().to_vec()));
    }
    events.push(LayoutEvent::FractionsChanged(model.fractions().to_vec()));
}
