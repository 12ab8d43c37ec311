use bevy_ecs::prelude::Resource;

use crate::components::shapes::points::{ControlPoint, ControlPointSequence};
use crate::config::{EditorOptions, PICK_RADIUS, SAMPLES_PER_SEGMENT};
use crate::math::error::SplineResult;
use crate::math::solve_spline::fit_natural_spline;

/// Which edit a pointer press performs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Add,
    Remove,
    Drag,
    Insert,
}

/// Input already mapped into workspace coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    SelectMode(EditMode),
    Press(ControlPoint),
    Release,
    CursorMoved(ControlPoint),
}

#[derive(Resource, Debug, Clone)]
pub struct ControlPointEditor {
    points: ControlPointSequence,
    mode: EditMode,
    dragging: bool,
    pick_radius: f64,
    samples_per_segment: usize,
}

impl ControlPointEditor {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: ControlPointSequence::with_capacity(max_points),
            mode: EditMode::Idle,
            dragging: false,
            pick_radius: PICK_RADIUS,
            samples_per_segment: SAMPLES_PER_SEGMENT,
        }
    }

    pub fn from_options(options: &EditorOptions) -> Self {
        Self {
            pick_radius: options.pick_radius,
            samples_per_segment: options.samples_per_segment,
            ..Self::new(options.max_control_points)
        }
    }

    pub fn points(&self) -> &ControlPointSequence {
        &self.points
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        if mode != EditMode::Drag {
            self.dragging = false;
        }
        if mode != self.mode {
            log::debug!("Edit mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Applies one input command. Returns whether the control points changed.
    pub fn apply(&mut self, command: EditCommand) -> SplineResult<bool> {
        match command {
            EditCommand::SelectMode(mode) => {
                self.set_mode(mode);
                Ok(false)
            }
            EditCommand::Press(point) => self.press(point),
            EditCommand::Release => {
                self.dragging = false;
                Ok(false)
            }
            EditCommand::CursorMoved(point) => Ok(self.dragging && self.move_nearest(point)),
        }
    }

    fn press(&mut self, point: ControlPoint) -> SplineResult<bool> {
        let mut changed = false;

        if self.points.is_full() {
            if matches!(self.mode, EditMode::Add | EditMode::Insert) {
                log::info!(
                    "All {} control points placed, leaving {:?} mode",
                    self.points.capacity(),
                    self.mode
                );
                self.mode = EditMode::Idle;
            }
        } else {
            match self.mode {
                EditMode::Add => changed = self.append(point),
                EditMode::Insert if self.points.len() > 1 => changed = self.insert_on_edge(point)?,
                _ => {}
            }
        }

        if self.mode == EditMode::Remove {
            if self.points.is_empty() {
                self.mode = EditMode::Idle;
            } else {
                changed |= self.remove_nearest(point);
            }
        }

        if self.mode == EditMode::Drag {
            self.dragging = true;
        }

        Ok(changed)
    }

    /// Adds `point` after the last control point. No-op outside Add mode or at capacity.
    pub fn append(&mut self, point: ControlPoint) -> bool {
        if self.mode != EditMode::Add {
            return false;
        }
        let added = self.points.push(point);
        if added {
            log::debug!("Added control point {} at ({:.3}, {:.3})", self.points.len() - 1, point.x, point.y);
        }
        added
    }

    /// Deletes the control point nearest to `point` within the pick radius.
    /// Leaves Remove mode once no points remain.
    pub fn remove_nearest(&mut self, point: ControlPoint) -> bool {
        if self.mode != EditMode::Remove {
            return false;
        }

        let removed = match self.points.nearest_within(&point, self.pick_radius) {
            Some((index, _)) => {
                self.points.remove(index);
                log::debug!("Removed control point {}", index);
                true
            }
            None => false,
        };

        if self.points.is_empty() {
            self.mode = EditMode::Idle;
        }

        removed
    }

    /// Moves the control point nearest to `point` within the pick radius onto it.
    pub fn move_nearest(&mut self, point: ControlPoint) -> bool {
        if self.mode != EditMode::Drag {
            return false;
        }

        match self.points.nearest_within(&point, self.pick_radius) {
            Some((index, _)) => self.points.set(index, point),
            None => false,
        }
    }

    /// Splits the segment closest to `point` by inserting the closest sampled
    /// curve point after its start.
    ///
    /// The click must be nearer to the curve than to any control point, and
    /// inside the pick radius, for anything to happen.
    pub fn insert_on_edge(&mut self, point: ControlPoint) -> SplineResult<bool> {
        if self.mode != EditMode::Insert || self.points.len() < 2 || self.points.is_full() {
            return Ok(false);
        }

        let point_distance = self
            .points
            .nearest_within(&point, self.pick_radius)
            .map_or(self.pick_radius, |(_, distance)| distance);

        let spline = fit_natural_spline(self.points.as_slice())?;
        let Some(hit) = spline.nearest_sample(&point, self.samples_per_segment, self.pick_radius) else {
            return Ok(false);
        };

        if hit.distance < point_distance && hit.distance < self.pick_radius {
            let index = hit.segment + 1;
            log::debug!("Inserted control point {} on segment {}", index, hit.segment);
            Ok(self.points.insert(index, hit.point))
        } else {
            Ok(false)
        }
    }
}

impl Default for ControlPointEditor {
    fn default() -> Self {
        Self::from_options(&EditorOptions::default())
    }
}
