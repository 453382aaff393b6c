use slat_core::{Orientation, Size, Transform, Vec2};

// ──────────────────────────────────────────────
// CoordinateMapper
// ──────────────────────────────────────────────

/// Turns raw pointer positions into positions along the layout axis,
/// normalized to the container's extent.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    orientation: Orientation,
    extent: Size,
    /// Container local space -> the space pointer events arrive in.
    transform: Transform,
}

impl CoordinateMapper {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            extent: Size::default(),
            transform: Transform::IDENTITY,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn extent(&self) -> Size {
        self.extent
    }

    pub fn set_extent(&mut self, extent: Size) {
        self.extent = extent;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Container extent along the layout axis.
    pub fn total_extent(&self) -> f32 {
        self.orientation.extent(self.extent)
    }

    /// True until the host reports a positive extent along the axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.total_extent() > 0.0)
    }

    /// Map `pointer` into the container and return where it falls along the
    /// axis: 0 at the leading edge, 1 at the trailing edge. Positions outside
    /// the container are not clamped, so a pointer dragged past the leading
    /// edge still reads as "before everything".
    ///
    /// `None` means the sample carries no usable position (container not
    /// sized yet, or a transform that collapses an axis) and should be ignored.
    pub fn to_normalized_position(&self, pointer: Vec2) -> Option<f64> {
        let total = self.total_extent();
        if !(total > 0.0) {
            return None;
        }
        let local = self.to_local(pointer)?;
        Some(f64::from(self.orientation.along(local)) / f64::from(total))
    }

    /// `pointer` in container-local space.
    pub fn to_local(&self, pointer: Vec2) -> Option<Vec2> {
        Some(self.transform.inverse()?.apply(pointer))
    }
}
