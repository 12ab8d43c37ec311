use bevy_ecs::system::{Res, ResMut};

use crate::components::shapes::spline::Spline;
use crate::editor::ControlPointEditor;
use crate::math::error::SplineResult;
use crate::math::solve_spline::fit_natural_spline;

// runs once per frame: the spline is rebuilt from scratch, nothing is cached
pub fn sys_update_spline(
    editor: Res<ControlPointEditor>,
    mut spline: ResMut<Spline>,
) -> SplineResult<()> {
    let points = editor.points().as_slice();

    spline.control_points = points.to_vec();

    if points.len() < 2 {
        spline.coefficients = None;
        spline.polylines.clear();
        return Ok(());
    }

    let coefficients = fit_natural_spline(points)?;
    spline.polylines = coefficients.polylines(editor.samples_per_segment());
    spline.coefficients = Some(coefficients);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::shapes::points::ControlPoint;
    use crate::editor::EditMode;
    use bevy_ecs::prelude::World;
    use bevy_ecs::system::RunSystemOnce;

    fn world_with(points: &[(f64, f64)]) -> World {
        let mut editor = ControlPointEditor::default();
        editor.set_mode(EditMode::Add);
        for &(x, y) in points {
            editor.append(ControlPoint::new(x, y, 0.0));
        }

        let mut world = World::default();
        world.insert_resource(editor);
        world.insert_resource(Spline::default());
        world
    }

    #[test]
    fn test_single_point_has_no_curve() {
        let mut world = world_with(&[(0.0, 0.0)]);
        world.run_system_once(sys_update_spline).unwrap();

        let spline = world.resource::<Spline>();
        assert!(spline.coefficients.is_none());
        assert!(spline.polylines.is_empty());
        assert_eq!(spline.control_points.len(), 1);
    }

    #[test]
    fn test_rebuilds_polylines_per_segment() {
        let mut world = world_with(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)]);
        world.run_system_once(sys_update_spline).unwrap();

        let spline = world.resource::<Spline>();
        assert_eq!(spline.polylines.len(), 2);
        assert!(spline.polylines.iter().all(|strip| strip.len() == 40));
        assert_eq!(spline.control_points.len(), 3);
    }

    #[test]
    fn test_clears_curve_after_points_drop_below_two() {
        let mut world = world_with(&[(0.0, 0.0), (1.0, 0.0)]);
        world.run_system_once(sys_update_spline).unwrap();
        assert_eq!(world.resource::<Spline>().polylines.len(), 1);

        {
            let mut editor = world.resource_mut::<ControlPointEditor>();
            editor.set_mode(EditMode::Remove);
            editor.remove_nearest(ControlPoint::new(1.0, 0.0, 0.0));
        }
        world.run_system_once(sys_update_spline).unwrap();

        let spline = world.resource::<Spline>();
        assert!(spline.polylines.is_empty());
        assert!(spline.coefficients.is_none());
    }
}
