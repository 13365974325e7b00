use nalgebra::{DMatrix, DVector, RealField};

use crate::Error;

/// Anything that can be normalized into an owned dense matrix.
///
/// Nested sequences are read row-major. Flat sequences (`Vec<T>`, `[T]`, `[T; N]`) and nalgebra
/// column vectors become a one-column matrix.
pub trait AsMatrix<T: RealField + Copy> {
    /// Copies `self` into a freshly allocated `DMatrix`.
    ///
    /// # Errors
    ///
    /// * `Err(Error::Ragged)` - a nested sequence has rows of differing length.
    fn to_matrix(&self) -> Result<DMatrix<T>, Error>;
}

/// Anything that can be normalized into an owned dense column vector.
pub trait AsVector<T: RealField + Copy> {
    /// Copies `self` into a freshly allocated `DVector`.
    fn to_vector(&self) -> Result<DVector<T>, Error>;
}

/// A direct solver for the square system `Ax = b`.
pub trait DirectSolver<T>
where
    T: RealField + Copy,
{
    /// Solves `Ax = b`, returning `x`.
    ///
    /// Neither `a` nor `b` is modified; the solver works on its own copies.
    ///
    /// ## Arguments
    /// * `a` the square coefficient matrix.
    /// * `b` the linear system right-hand side.
    fn solve(&self, a: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, Error>;
}
