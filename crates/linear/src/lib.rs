//! Classical direct solvers for small, dense, square linear systems `Ax = b`.
//!
//! The row reduction runs without pivoting: every diagonal entry met during elimination must be
//! nonzero, and a (numerically) zero pivot is reported as [`Error::SingularMatrix`] instead of
//! reordering rows.
//!
//! * [`row_echelon`] reduces `[A | b]` to row-echelon form and records the multipliers `L`.
//! * [`forward_sub`] and [`back_sub`] solve the unit-lower and upper triangular systems.
//! * [`gaussian_elimination`] and [`lu`] compose the above.
//! * [`gauss_jordan`] reduces `[A | B]` all the way to reduced row-echelon form, either solving
//!   for a single right-hand side or inverting `A`.
//!
//! Inputs may be nalgebra matrices/vectors or plain nested sequences, see [`AsMatrix`] and
//! [`AsVector`].

pub mod constants;
mod dense;
mod echelon;
mod gauss_jordan;
mod solve;
mod substitution;
mod traits;

pub use echelon::{row_echelon, RowEchelon};
pub use gauss_jordan::{
    gauss_jordan, gauss_jordan_reduce, gauss_jordan_solve, inverse, Reduced, Target,
};
pub use solve::{gaussian_elimination, lu, Method};
pub use substitution::{back_sub, forward_sub};
pub use traits::{AsMatrix, AsVector, DirectSolver};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A singular matrix was encountered during elimination (zero pivot in col {col})")]
    SingularMatrix { col: usize },

    #[error("Coefficient matrix must be square and non-empty, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A nested input sequence had rows of differing length.
    #[error("Row {row} has {got} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },
}
