//! Interactive natural cubic spline editor.
//!
//! The core is windowing-free: [`ControlPointEditor`] owns the control points
//! and applies edits, and [`math::solve_spline`] turns the points into a
//! piecewise cubic every frame.

pub mod components;
pub mod config;
pub mod editor;
pub mod math;
pub mod render;
pub mod systems;
pub mod viewport;

pub use components::shapes::points::{ControlPoint, ControlPointSequence};
pub use components::shapes::spline::Spline;
pub use config::EditorOptions;
pub use editor::{ControlPointEditor, EditCommand, EditMode};
pub use math::error::{SplineError, SplineResult};
pub use math::solve_spline::{
    build_system, fit_natural_spline, solve, CurveHit, LinearSystem, SplineCoefficients,
};
pub use viewport::Viewport;
