use crate::components::shapes::points::ControlPoint;

/// Maps window pixels to the editing workspace and back.
///
/// The workspace spans `[-aspect, aspect]` horizontally and `[-1, 1]`
/// vertically with y pointing up, where `aspect = width / height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f64,
            height: height.max(1) as f64,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn to_workspace(&self, x: f64, y: f64) -> ControlPoint {
        ControlPoint::new(
            2.0 * (x / self.width - 0.5) * self.aspect(),
            -2.0 * (y / self.height - 0.5),
            0.0,
        )
    }

    pub fn to_screen(&self, point: &ControlPoint) -> (f64, f64) {
        (
            (point.x / (2.0 * self.aspect()) + 0.5) * self.width,
            (0.5 - point.y / 2.0) * self.height,
        )
    }
}
