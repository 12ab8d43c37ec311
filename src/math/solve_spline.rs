use nalgebra::{DMatrix, Vector3 as Vec3};
use rayon::prelude::*;

use super::error::{SplineError, SplineResult};

/// Pivots of R smaller than this, relative to the largest one, count as zero.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// `A·C = B` for a natural cubic spline with `(rows / 4)` segments.
///
/// Unknowns are ordered per segment as `c0, c1, c2, c3`, so column `4i + k`
/// holds coefficient `k` of segment `i`. `B` carries one column per axis.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub a: DMatrix<f64>,
    pub b: DMatrix<f64>,
}

impl LinearSystem {
    pub fn size(&self) -> usize {
        self.a.nrows()
    }

    pub fn segment_count(&self) -> usize {
        self.size() / 4
    }
}

/// Builds the interpolation system for the control points, in row order:
/// end point interpolation, C1 joints, C2 joints, natural end conditions.
pub fn build_system(points: &[Vec3<f64>]) -> SplineResult<LinearSystem> {
    if points.len() < 2 {
        return Err(SplineError::TooFewPoints {
            required: 2,
            actual: points.len(),
        });
    }

    let segments = points.len() - 1;
    let size = 4 * segments;
    let mut a = DMatrix::zeros(size, size);
    let mut b = DMatrix::zeros(size, 3);
    let mut row = 0;

    // p_i(0) = c0 and p_i(1) = c0 + c1 + c2 + c3
    for i in 0..segments {
        let col = 4 * i;
        a[(row, col)] = 1.0;
        set_rhs(&mut b, row, &points[i]);

        for k in 0..4 {
            a[(row + 1, col + k)] = 1.0;
        }
        set_rhs(&mut b, row + 1, &points[i + 1]);

        row += 2;
    }

    // p'_i(1) = c1 + 2c2 + 3c3 = c1 of the next segment
    for i in 0..segments - 1 {
        let col = 4 * i;
        a[(row, col + 1)] = 1.0;
        a[(row, col + 2)] = 2.0;
        a[(row, col + 3)] = 3.0;
        a[(row, col + 5)] = -1.0;
        row += 1;
    }

    // p''_i(1) = 2c2 + 6c3 = 2c2 of the next segment
    for i in 0..segments - 1 {
        let col = 4 * i;
        a[(row, col + 2)] = 2.0;
        a[(row, col + 3)] = 6.0;
        a[(row, col + 6)] = -2.0;
        row += 1;
    }

    // natural ends: zero curvature at the very start and the very end
    a[(row, 2)] = 2.0;
    row += 1;

    let last = 4 * (segments - 1);
    a[(row, last + 2)] = 2.0;
    a[(row, last + 3)] = 6.0;
    row += 1;

    debug_assert_eq!(row, size);

    Ok(LinearSystem { a, b })
}

#[inline]
fn set_rhs(b: &mut DMatrix<f64>, row: usize, p: &Vec3<f64>) {
    b[(row, 0)] = p.x;
    b[(row, 1)] = p.y;
    b[(row, 2)] = p.z;
}

/// Solves all three axes at once with a column-pivoting QR.
pub fn solve(system: LinearSystem) -> SplineResult<SplineCoefficients> {
    let LinearSystem { a, b } = system;
    let size = a.nrows();

    if b.nrows() != size {
        return Err(SplineError::ShapeMismatch {
            matrix_rows: size,
            rhs_rows: b.nrows(),
        });
    }

    let qr = a.col_piv_qr();

    let pivots = qr.r().diagonal();
    let largest = pivots.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
    if largest == 0.0 || pivots.iter().any(|d| d.abs() <= largest * SINGULAR_TOLERANCE) {
        return Err(SplineError::Singular { size });
    }

    let c = qr.solve(&b).ok_or(SplineError::Singular { size })?;

    Ok(SplineCoefficients::from_solution(&c))
}

/// `build_system` followed by `solve`.
pub fn fit_natural_spline(points: &[Vec3<f64>]) -> SplineResult<SplineCoefficients> {
    solve(build_system(points)?)
}

/// Per segment cubic `c0 + c1 t + c2 t^2 + c3 t^3`, one vector per coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCoefficients {
    segments: Vec<[Vec3<f64>; 4]>,
}

impl SplineCoefficients {
    fn from_solution(c: &DMatrix<f64>) -> Self {
        let segments = (0..c.nrows() / 4)
            .map(|i| {
                std::array::from_fn(|k| {
                    let row = 4 * i + k;
                    Vec3::new(c[(row, 0)], c[(row, 1)], c[(row, 2)])
                })
            })
            .collect();

        Self { segments }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, i: usize) -> Option<&[Vec3<f64>; 4]> {
        self.segments.get(i)
    }

    /// Position on segment `i` at local parameter `t`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a segment index.
    pub fn evaluate(&self, i: usize, t: f64) -> Vec3<f64> {
        let [c0, c1, c2, c3] = &self.segments[i];
        c0 + (c1 + (c2 + c3 * t) * t) * t
    }

    pub fn derivative(&self, i: usize, t: f64) -> Vec3<f64> {
        let [_, c1, c2, c3] = &self.segments[i];
        c1 + (c2 * 2.0 + c3 * (3.0 * t)) * t
    }

    pub fn second_derivative(&self, i: usize, t: f64) -> Vec3<f64> {
        let [_, _, c2, c3] = &self.segments[i];
        c2 * 2.0 + c3 * (6.0 * t)
    }

    /// `samples` evenly spaced points on segment `i`, both ends included.
    pub fn sample_segment(&self, i: usize, samples: usize) -> Vec<Vec3<f64>> {
        let steps = samples.max(2) - 1;
        (0..samples)
            .map(|j| self.evaluate(i, j as f64 / steps as f64))
            .collect()
    }

    /// One line strip per segment.
    pub fn polylines(&self, samples: usize) -> Vec<Vec<Vec3<f64>>> {
        (0..self.segment_count())
            .into_par_iter()
            .map(|i| self.sample_segment(i, samples))
            .collect()
    }

    /// Sampled curve point closest to `target` and strictly inside `radius`.
    /// Earlier segments and samples win ties.
    pub fn nearest_sample(&self, target: &Vec3<f64>, samples: usize, radius: f64) -> Option<CurveHit> {
        let mut best: Option<CurveHit> = None;
        let mut best_distance = radius;

        for segment in 0..self.segment_count() {
            for point in self.sample_segment(segment, samples) {
                let distance = point.metric_distance(target);
                if distance < best_distance {
                    best_distance = distance;
                    best = Some(CurveHit {
                        segment,
                        point,
                        distance,
                    });
                }
            }
        }

        best
    }
}

/// A sampled point on the curve near a query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    pub segment: usize,
    pub point: Vec3<f64>,
    pub distance: f64,
}
