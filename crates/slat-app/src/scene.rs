// Scripted scenes: a pane setup plus a list of pointer and layout steps,
// replayed against a ReorderablePane one step at a time.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use slat_core::{Orientation, RegionId, ReorderMode, Size, Transform};
use slat_input::{ReorderSettings, ReorderablePane};
use slat_layout::{FractionPolicy, LayoutError};

// ──────────────────────────────────────────────
// Scene format
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub orientation: Orientation,
    /// Container size in pixels.
    #[serde(default = "default_extent")]
    pub extent: Size,
    /// Container local space -> pointer space.
    #[serde(default)]
    pub transform: Option<Transform>,
    /// Overrides the mode from settings.
    #[serde(default)]
    pub mode: Option<ReorderMode>,
    /// Region labels in their initial order.
    pub regions: Vec<String>,
    #[serde(default)]
    pub fractions: Option<Vec<f64>>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_extent() -> Size {
    Size::new(800.0, 600.0)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Press at (x, y). Without a label the region is found by hit-testing.
    Down {
        #[serde(default)]
        region: Option<String>,
        x: f32,
        y: f32,
    },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
    Insert {
        region: String,
        index: usize,
        #[serde(default)]
        fraction: Option<f64>,
    },
    Remove { index: usize },
    Resize { width: f32, height: f32 },
    Divider { index: usize, position: f64 },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Down {
                region: Some(region),
                x,
                y,
            } => write!(f, "down {} @ ({}, {})", region, x, y),
            Step::Down { region: None, x, y } => write!(f, "down @ ({}, {})", x, y),
            Step::Move { x, y } => write!(f, "move ({}, {})", x, y),
            Step::Up { x, y } => write!(f, "up ({}, {})", x, y),
            Step::Cancel => write!(f, "cancel"),
            Step::Insert { region, index, .. } => write!(f, "insert {} at {}", region, index),
            Step::Remove { index } => write!(f, "remove {}", index),
            Step::Resize { width, height } => write!(f, "resize {}x{}", width, height),
            Step::Divider { index, position } => write!(f, "divider {} -> {}", index, position),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown region label {0:?}")]
    UnknownRegion(String),
    #[error("step {step} ({description}): {source}")]
    Step {
        step: usize,
        description: String,
        source: LayoutError,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Four stacked panes; pane 1 is dragged past the other three to the
    /// bottom and released.
    pub fn demo() -> Self {
        let regions = (1..=4).map(|i| format!("pane {}", i)).collect();
        let x = 200.0;
        Self {
            orientation: Orientation::Vertical,
            extent: Size::new(400.0, 800.0),
            transform: None,
            mode: None,
            regions,
            fractions: None,
            steps: vec![
                Step::Down {
                    region: Some("pane 1".to_string()),
                    x,
                    y: 100.0,
                },
                Step::Move { x, y: 300.0 },
                Step::Move { x, y: 500.0 },
                Step::Move { x, y: 700.0 },
                Step::Up { x, y: 700.0 },
            ],
        }
    }
}

// ──────────────────────────────────────────────
// Replay
// ──────────────────────────────────────────────

/// Layout after one step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: String,
    pub order: Vec<String>,
    pub fractions: Vec<f64>,
    pub dividers: Vec<f64>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} order=[{}] fractions=[{}] dividers=[{}]",
            self.step,
            self.order.join(", "),
            format_values(&self.fractions),
            format_values(&self.dividers)
        )
    }
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.3}", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Region labels. A label's id is its position in `names` plus one.
struct Labels {
    names: Vec<String>,
}

impl Labels {
    fn id(&self, label: &str) -> Option<RegionId> {
        self.names
            .iter()
            .position(|n| n == label)
            .map(|i| i as RegionId + 1)
    }

    fn id_or_insert(&mut self, label: &str) -> RegionId {
        match self.id(label) {
            Some(id) => id,
            None => {
                self.names.push(label.to_string());
                self.names.len() as RegionId
            }
        }
    }

    fn name(&self, id: RegionId) -> String {
        usize::try_from(id)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.names.get(i))
            .cloned()
            .unwrap_or_else(|| format!("#{}", id))
    }
}

/// Replay `scene` and return the layout after the initial attach and after
/// every step.
pub fn run(scene: &Scene, mut settings: ReorderSettings) -> Result<Vec<StepReport>, SceneError> {
    if let Some(mode) = scene.mode {
        settings.mode = mode;
    }
    let mut labels = Labels {
        names: Vec::new(),
    };
    let regions = scene
        .regions
        .iter()
        .map(|label| labels.id_or_insert(label))
        .collect();

    let mut pane = ReorderablePane::new(scene.orientation, settings);
    pane.attach(regions, scene.fractions.clone())?;
    pane.set_container_extent(scene.extent.width, scene.extent.height);
    if let Some(transform) = scene.transform {
        pane.set_container_transform(transform);
    }
    log_events(&mut pane);

    let mut reports = vec![report("attach".to_string(), &pane, &labels)];
    for (i, step) in scene.steps.iter().enumerate() {
        apply_step(&mut pane, &mut labels, step).map_err(|e| match e {
            SceneError::Layout(source) => SceneError::Step {
                step: i,
                description: step.to_string(),
                source,
            },
            other => other,
        })?;
        log_events(&mut pane);
        reports.push(report(step.to_string(), &pane, &labels));
    }
    Ok(reports)
}

fn apply_step(
    pane: &mut ReorderablePane,
    labels: &mut Labels,
    step: &Step,
) -> Result<(), SceneError> {
    match step {
        Step::Down { region, x, y } => {
            let id = match region {
                Some(label) => labels
                    .id(label)
                    .ok_or_else(|| SceneError::UnknownRegion(label.clone()))?,
                None => match pane.region_at(*x, *y) {
                    Some(id) => id,
                    None => {
                        log::info!("press at ({}, {}) hit no region", x, y);
                        return Ok(());
                    }
                },
            };
            if !pane.on_pointer_down(id, *x, *y) {
                log::info!("press on {} ignored", labels.name(id));
            }
        }
        Step::Move { x, y } => {
            let outcome = pane.on_pointer_move(*x, *y);
            log::debug!("move ({}, {}): {:?}", x, y, outcome);
        }
        Step::Up { x, y } => {
            pane.on_pointer_up(*x, *y);
        }
        Step::Cancel => {
            pane.cancel();
        }
        Step::Insert {
            region,
            index,
            fraction,
        } => {
            let id = labels.id_or_insert(region);
            let policy = fraction.map_or(FractionPolicy::EqualShare, FractionPolicy::Exact);
            pane.insert_region(id, *index, policy)?;
        }
        Step::Remove { index } => {
            pane.remove_region(*index)?;
        }
        Step::Resize { width, height } => pane.set_container_extent(*width, *height),
        Step::Divider { index, position } => {
            pane.drag_divider(*index, *position)?;
        }
    }
    Ok(())
}

fn report(step: String, pane: &ReorderablePane, labels: &Labels) -> StepReport {
    StepReport {
        step,
        order: pane
            .model()
            .regions()
            .iter()
            .map(|id| labels.name(*id))
            .collect(),
        fractions: pane.model().fractions().to_vec(),
        dividers: pane.get_divider_positions(),
    }
}

fn log_events(pane: &mut ReorderablePane) {
    for event in pane.drain_events() {
        log::info!("event: {:?}", event);
    }
}
