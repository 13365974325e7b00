//! Numeric tolerances shared by the reducers.

/// A pivot `p` of an `m×m` system is treated as zero when
/// `|p| <= PIVOT_RTOL_FACTOR * m * EPSILON * max|A_ij|`.
pub const PIVOT_RTOL_FACTOR: f64 = 1.0;

/// `max_relative` used by [`crate::Target::infer`] when comparing a right-hand side against the
/// identity matrix with `approx::relative_eq!`.
pub const IDENTITY_RTOL: f64 = 1e-5;

/// `epsilon` (absolute tolerance) paired with [`IDENTITY_RTOL`].
pub const IDENTITY_ATOL: f64 = 1e-8;
