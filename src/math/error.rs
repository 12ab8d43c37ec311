use thiserror::Error;

pub type SplineResult<T> = Result<T, SplineError>;

/// Failures of the natural cubic spline solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// The solver needs at least one segment.
    #[error("a spline needs at least {required} control points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// The coefficient matrix has no unique solution.
    #[error("spline system of size {size} is singular")]
    Singular { size: usize },

    #[error("system matrix has {matrix_rows} rows but the right-hand side has {rhs_rows}")]
    ShapeMismatch { matrix_rows: usize, rhs_rows: usize },
}
