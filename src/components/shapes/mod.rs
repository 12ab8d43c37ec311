pub mod points;
pub mod spline;
