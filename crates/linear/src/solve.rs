//! Top-level solve routines composing the row reducer with the triangular solves.

use log::trace;
use nalgebra::{DMatrix, DVector, RealField};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    echelon::reduce,
    gauss_jordan::gauss_jordan_solve,
    substitution::{back_substitute, forward_substitute},
    AsMatrix, AsVector, DirectSolver, Error,
};

/// Solves `A x = b` by row reduction of `[A | b]` followed by backward substitution on `(U, y)`.
///
/// ## Errors
/// * `Err(Error::SingularMatrix)` if `A` is (numerically) singular.
/// * `Err(Error::NotSquare)` / `Err(Error::DimensionMismatch)` for badly shaped input.
pub fn gaussian_elimination<T, A, B>(a: &A, b: &B) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
    B: AsVector<T> + ?Sized,
{
    let b = b.to_vector()?;
    trace!("gaussian_elimination(m={})", b.nrows());

    let rf = reduce(&a.to_matrix()?, &as_column(&b))?;
    back_substitute(&rf.u, &rf.y_vector())
}

/// Solves `A x = b` through the explicit factors: `L d = b` by forward substitution, then
/// `U x = d` by backward substitution.
///
/// The transformed right-hand side from the reduction is discarded; `d` is recomputed from `L`,
/// so this path agrees with [`gaussian_elimination`] only up to rounding.
pub fn lu<T, A, B>(a: &A, b: &B) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
    B: AsVector<T> + ?Sized,
{
    let b = b.to_vector()?;
    trace!("lu(m={})", b.nrows());

    let rf = reduce(&a.to_matrix()?, &as_column(&b))?;
    let d = forward_substitute(&rf.l, &b)?;
    back_substitute(&rf.u, &d)
}

fn as_column<T: RealField + Copy>(b: &DVector<T>) -> DMatrix<T> {
    DMatrix::from_column_slice(b.nrows(), 1, b.as_slice())
}

/// The available direct solve paths.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// [`gaussian_elimination`]
    GaussianElimination,
    /// [`lu`]
    Lu,
    /// [`crate::gauss_jordan_solve`]
    GaussJordan,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::GaussianElimination, Method::Lu, Method::GaussJordan];
}

impl<T> DirectSolver<T> for Method
where
    T: RealField + Copy,
{
    fn solve(&self, a: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, Error> {
        match self {
            Method::GaussianElimination => gaussian_elimination(a, b),
            Method::Lu => lu(a, b),
            Method::GaussJordan => gauss_jordan_solve(a, b),
        }
    }
}
