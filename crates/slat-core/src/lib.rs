// Core types shared by the slat crates.
// Geometry, region identity, orientation, and the events a layout host
// receives. Nothing in here knows about a windowing system.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Edges are inclusive, so a point on a shared edge is in both rects.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Affine transform from a container's local space to screen space:
///
/// ```text
/// screen.x = a * x + c * y + tx
/// screen.y = b * x + d * y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self { tx, ty, ..Self::IDENTITY }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Scale first, then translate. The common case for a container placed
    /// inside a zoomed ancestor.
    pub fn scale_translate(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Self { a: sx, d: sy, tx, ty, ..Self::IDENTITY }
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// The screen-to-local transform, or `None` when this one collapses an axis.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        let inv = 1.0 / det;
        if det == 0.0 || !inv.is_finite() {
            return None;
        }
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Self {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + c * self.ty),
            ty: -(b * self.tx + d * self.ty),
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

/// Opaque handle for one content region. The engine only compares and
/// reorders these; the host owns whatever they refer to.
pub type RegionId = u64;

// ──────────────────────────────────────────────
// Layout types
// ──────────────────────────────────────────────

/// Axis along which fractions are measured. Horizontal lays regions out
/// left to right (fractions of the width), vertical top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `point` along this axis.
    pub fn along(self, point: Vec2) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Extent of `size` along this axis.
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }
}

/// One entry of the order as it should be drawn while a gesture is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Region(RegionId),
    /// Zero-size marker previewing where the dragged region will land.
    Placeholder,
}

// ──────────────────────────────────────────────
// Interaction types
// ──────────────────────────────────────────────

/// How a region drag turns into a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderMode {
    /// The dragged region hops past each neighbor as soon as the pointer
    /// crosses that neighbor's boundary.
    #[default]
    DirectSwap,
    /// A marker previews the insertion slot; the move happens on release.
    PlaceholderInsert,
}

/// Cursor shape the host should show. Emitted as an event so the engine
/// never touches shared UI state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grabbing,
}

/// Why a gesture ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAbort {
    /// Host asked for it (escape, focus loss, pointer left the container).
    Cancelled,
    /// The order changed underneath the gesture.
    StaleGestureState,
}

/// Notifications for the host, drained after each call into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    OrderChanged(Vec<RegionId>),
    FractionsChanged(Vec<f64>),
    PlaceholderMoved(Option<usize>),
    CursorChanged(CursorHint),
    GestureAborted(GestureAbort),
}

// ──────────────────────────────────────────────
// Trait: ProportionalLayout
// ──────────────────────────────────────────────

/// Anything that partitions one extent among ordered regions.
/// Hosts use this to position dividers and content.
pub trait ProportionalLayout {
    fn orientation(&self) -> Orientation;
    fn regions(&self) -> &[RegionId];
    fn fractions(&self) -> &[f64];
    /// Cumulative boundaries between adjacent regions, `len() - 1` of them.
    fn dividers(&self) -> Vec<f64>;
    fn region_rects(&self, bounds: Rect) -> Vec<(RegionId, Rect)>;
}
