// Drag-to-reorder input handling (slat-input)
// Maps pointer samples onto the layout axis and drives one press-drag-release
// gesture at a time through a pluggable reorder strategy.

mod controller;
mod mapper;
mod pane;
mod session;
mod settings;
mod strategy;

pub use controller::{DragController, GestureState, SampleOutcome};
pub use mapper::CoordinateMapper;
pub use pane::ReorderablePane;
pub use session::DragSession;
pub use settings::{ReorderSettings, DEFAULT_DRAG_THRESHOLD};
pub use strategy::{strategy_for, DirectSwap, MutationCommand, PlaceholderInsert, ReorderStrategy};
