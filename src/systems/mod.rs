pub mod update_spline;
