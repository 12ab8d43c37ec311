use std::sync::Arc;

use vello::kurbo::{Affine, BezPath, Circle, Point, Stroke};
use vello::peniko::{Color, Fill};
use vello::util::RenderSurface;
use vello::Scene;
use winit::window::Window;

use crate::components::shapes::points::ControlPoint;
use crate::components::shapes::spline::Spline;
use crate::config::EditorOptions;
use crate::viewport::Viewport;

// Simple struct to hold the state of the renderer
pub struct ActiveRenderState<'s> {
    pub surface: RenderSurface<'s>,
    pub window: Arc<Window>,
}

pub enum RenderState<'s> {
    Active(ActiveRenderState<'s>),
    Suspended(Option<Arc<Window>>),
}

pub fn rgb(color: [u8; 3]) -> Color {
    Color::rgb8(color[0], color[1], color[2])
}

/// Line strip per segment, then the control point markers on top.
pub fn draw_spline(scene: &mut Scene, spline: &Spline, viewport: &Viewport, options: &EditorOptions) {
    let to_point = |p: &ControlPoint| {
        let (x, y) = viewport.to_screen(p);
        Point::new(x, y)
    };

    let curve_color = rgb(options.curve_color);
    for strip in &spline.polylines {
        let mut path = BezPath::new();
        for (j, p) in strip.iter().enumerate() {
            if j == 0 {
                path.move_to(to_point(p));
            } else {
                path.line_to(to_point(p));
            }
        }
        scene.stroke(
            &Stroke::new(options.curve_width),
            Affine::IDENTITY,
            &curve_color,
            None,
            &path,
        );
    }

    let point_color = rgb(options.point_color);
    for p in &spline.control_points {
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            &point_color,
            None,
            &Circle::new(to_point(p), options.point_radius),
        );
    }
}
