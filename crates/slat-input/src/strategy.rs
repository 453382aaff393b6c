use slat_core::ReorderMode;
use slat_layout::LayoutModel;

use crate::DragSession;

// ──────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────

/// A change a strategy asks the controller to make.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationCommand {
    /// Exchange two adjacent regions right now.
    Swap { from: usize, to: usize },
    /// Move the insertion marker to `slot` (0..=len). Preview only.
    ShowPlaceholder { slot: usize },
    /// Move one region and replace all fractions in a single step.
    Move {
        from: usize,
        to: usize,
        fractions: Vec<f64>,
    },
}

// ──────────────────────────────────────────────
// Trait: ReorderStrategy
// ──────────────────────────────────────────────

/// Decides how pointer samples during a drag turn into model changes.
/// Strategies keep no state of their own; everything lives in the session.
pub trait ReorderStrategy {
    fn mode(&self) -> ReorderMode;

    /// Evaluate one normalized pointer position.
    fn on_sample(
        &self,
        session: &mut DragSession,
        model: &LayoutModel,
        position: f64,
    ) -> Option<MutationCommand>;

    /// The pointer went up; return the final change, if any.
    fn on_release(&self, session: &mut DragSession, model: &LayoutModel)
        -> Option<MutationCommand>;
}

pub fn strategy_for(mode: ReorderMode) -> Box<dyn ReorderStrategy> {
    match mode {
        ReorderMode::DirectSwap => Box::new(DirectSwap),
        ReorderMode::PlaceholderInsert => Box::new(PlaceholderInsert),
    }
}

// ──────────────────────────────────────────────
// DirectSwap
// ──────────────────────────────────────────────

/// Hop past a neighbor as soon as the pointer leaves the current slot.
/// At most one hop per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSwap;

impl ReorderStrategy for DirectSwap {
    fn mode(&self) -> ReorderMode {
        ReorderMode::DirectSwap
    }

    fn on_sample(
        &self,
        session: &mut DragSession,
        model: &LayoutModel,
        position: f64,
    ) -> Option<MutationCommand> {
        let len = model.len();
        let current = session.current_index;
        if current >= len {
            return None;
        }

        let dividers = model.dividers();
        let left = if current == 0 { 0.0 } else { dividers[current - 1] };
        let right = if current == len - 1 { 1.0 } else { dividers[current] };

        if position < left && current > 0 {
            session.current_index = current - 1;
            Some(MutationCommand::Swap {
                from: current,
                to: current - 1,
            })
        } else if position > right && current < len - 1 {
            session.current_index = current + 1;
            Some(MutationCommand::Swap {
                from: current,
                to: current + 1,
            })
        } else {
            None
        }
    }

    fn on_release(&self, _session: &mut DragSession, _model: &LayoutModel) -> Option<MutationCommand> {
        // Every crossing was already applied while dragging.
        None
    }
}

// ──────────────────────────────────────────────
// PlaceholderInsert
// ──────────────────────────────────────────────

/// Preview the insertion slot with a marker and move the region on release,
/// each region keeping the size it had when the drag started.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderInsert;

impl PlaceholderInsert {
    /// First slot, skipping the dragged region, whose leading boundary lies
    /// past `position`; `len` when there is none.
    pub fn candidate_slot(model: &LayoutModel, dragged: usize, position: f64) -> usize {
        let dividers = model.dividers();
        (0..model.len())
            .filter(|k| *k != dragged)
            .find(|k| {
                let leading = if *k == 0 { 0.0 } else { dividers[*k - 1] };
                leading > position
            })
            .unwrap_or(model.len())
    }

    /// Where the dragged region lands once the marker at `slot` is removed.
    pub fn destination(dragged: usize, slot: usize) -> usize {
        if slot > dragged {
            slot - 1
        } else {
            slot
        }
    }
}

impl ReorderStrategy for PlaceholderInsert {
    fn mode(&self) -> ReorderMode {
        ReorderMode::PlaceholderInsert
    }

    fn on_sample(
        &self,
        session: &mut DragSession,
        model: &LayoutModel,
        position: f64,
    ) -> Option<MutationCommand> {
        let slot = Self::candidate_slot(model, session.dragged_index, position);
        if session.placeholder_index == Some(slot) {
            return None;
        }
        session.placeholder_index = Some(slot);
        Some(MutationCommand::ShowPlaceholder { slot })
    }

    fn on_release(&self, session: &mut DragSession, model: &LayoutModel) -> Option<MutationCommand> {
        let slot = session.placeholder_index.take()?;
        let from = session.dragged_index;
        let to = Self::destination(from, slot);
        if to == from {
            return None;
        }

        // Out-of-range indices are passed through; applying the move rejects
        // them and the gesture is aborted.
        let mut fractions = session.original_fractions().to_vec();
        if from < fractions.len() && to < fractions.len() {
            let moved = fractions.remove(from);
            fractions.insert(to, moved);
        }
        log::trace!("placeholder release: {} -> {} of {}", from, to, model.len());
        Some(MutationCommand::Move { from, to, fractions })
    }
}
