pub mod error;
pub mod solve_spline;
