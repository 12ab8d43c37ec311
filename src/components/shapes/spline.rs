use bevy_ecs::prelude::Resource;

use super::points::ControlPoint;
use crate::math::solve_spline::SplineCoefficients;

/// What the renderer draws this frame, rebuilt from the control points.
#[derive(Resource, Default, Clone)]
pub struct Spline {
    pub coefficients: Option<SplineCoefficients>,
    pub polylines: Vec<Vec<ControlPoint>>,
    pub control_points: Vec<ControlPoint>,
}
