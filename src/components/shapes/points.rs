use nalgebra::Vector3 as Vec3;

pub type ControlPoint = Vec3<f64>;

/// Ordered control points; segment `i` runs from point `i` to point `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSequence {
    points: Vec<ControlPoint>,
    capacity: usize,
}

impl ControlPointSequence {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn as_slice(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Returns false when the sequence is full.
    pub fn push(&mut self, point: ControlPoint) -> bool {
        if self.is_full() {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Inserts before `index`, shifting the tail up. Returns false when full
    /// or when `index` is past the end.
    pub fn insert(&mut self, index: usize, point: ControlPoint) -> bool {
        if self.is_full() || index > self.points.len() {
            return false;
        }
        self.points.insert(index, point);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<ControlPoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn set(&mut self, index: usize, point: ControlPoint) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Closest point strictly inside `radius`, with its distance.
    /// The lowest index wins ties.
    pub fn nearest_within(&self, target: &ControlPoint, radius: f64) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_distance = radius;

        for (i, p) in self.points.iter().enumerate() {
            let distance = p.metric_distance(target);
            if distance < best_distance {
                best_distance = distance;
                best = Some((i, distance));
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(points: &[(f64, f64)]) -> ControlPointSequence {
        let mut s = ControlPointSequence::with_capacity(10);
        for &(x, y) in points {
            assert!(s.push(ControlPoint::new(x, y, 0.0)));
        }
        s
    }

    #[test]
    fn test_push_stops_at_capacity() {
        let mut s = ControlPointSequence::with_capacity(2);
        assert!(s.push(ControlPoint::zeros()));
        assert!(s.push(ControlPoint::zeros()));
        assert!(s.is_full());
        assert!(!s.push(ControlPoint::zeros()));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_insert_shifts_tail() {
        let mut s = seq(&[(0.0, 0.0), (2.0, 0.0)]);
        assert!(s.insert(1, ControlPoint::new(1.0, 0.0, 0.0)));
        let xs: Vec<f64> = s.as_slice().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert!(!s.insert(5, ControlPoint::zeros()));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut s = seq(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(s.remove(0), Some(ControlPoint::new(0.0, 0.0, 0.0)));
        let xs: Vec<f64> = s.as_slice().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert_eq!(s.remove(2), None);
    }

    #[test]
    fn test_nearest_within_radius() {
        let s = seq(&[(0.0, 0.0), (1.0, 0.0), (1.1, 0.0)]);
        let hit = s.nearest_within(&ControlPoint::new(1.04, 0.0, 0.0), 0.25);
        assert_eq!(hit.map(|(i, _)| i), Some(1));

        assert!(s.nearest_within(&ControlPoint::new(0.5, 0.5, 0.0), 0.25).is_none());
    }

    #[test]
    fn test_nearest_excludes_exact_radius_and_prefers_lower_index() {
        let s = seq(&[(0.0, 0.0), (0.5, 0.0)]);
        // equidistant from both
        let hit = s.nearest_within(&ControlPoint::new(0.25, 0.0, 0.0), 0.3);
        assert_eq!(hit.map(|(i, _)| i), Some(0));

        let s = seq(&[(0.0, 0.0)]);
        assert!(s.nearest_within(&ControlPoint::new(0.25, 0.0, 0.0), 0.25).is_none());
    }
}
