//! Triangular solves against the factors produced by [`crate::row_echelon`].

use log::trace;
use nalgebra::{DMatrix, DVector, RealField};
use num_traits::Zero;

use crate::{
    dense::{check_rows, square_dim},
    AsMatrix, AsVector, Error,
};

/// Solves the unit lower-triangular system `L d = b` for `d`.
///
/// The diagonal of `L` is taken to be 1 (as produced by [`crate::row_echelon`]) and is never
/// divided by; only entries strictly below it are read. A zero on the diagonal means `L` did not
/// come from a valid elimination and is rejected.
pub fn forward_sub<T, L, B>(l: &L, b: &B) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
    L: AsMatrix<T> + ?Sized,
    B: AsVector<T> + ?Sized,
{
    forward_substitute(&l.to_matrix()?, &b.to_vector()?)
}

pub(crate) fn forward_substitute<T>(
    mat_l: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    let m = square_dim(mat_l)?;
    check_rows(m, b.nrows())?;
    trace!("forward_sub(m={})", m);

    if let Some(col) = (0..m).find(|&k| mat_l[(k, k)] == T::zero()) {
        return Err(Error::SingularMatrix { col });
    }

    let mut d = DVector::<T>::zeros(m);
    d[0] = b[0];
    for row in 1..m {
        let mut sum = b[row];
        for i in 0..row {
            sum -= mat_l[(row, i)] * d[i];
        }
        d[row] = sum;
    }
    Ok(d)
}

/// Solves the upper-triangular system `U x = y` for `x`.
///
/// Rows are resolved strictly bottom-up: `x[row]` needs every `x[i]` with `i > row`.
///
/// ## Errors
/// * `Err(Error::SingularMatrix)` if a diagonal entry of `U` is zero.
pub fn back_sub<T, U, Y>(u: &U, y: &Y) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
    U: AsMatrix<T> + ?Sized,
    Y: AsVector<T> + ?Sized,
{
    back_substitute(&u.to_matrix()?, &y.to_vector()?)
}

pub(crate) fn back_substitute<T>(
    mat_u: &DMatrix<T>,
    y: &DVector<T>,
) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    let m = square_dim(mat_u)?;
    check_rows(m, y.nrows())?;
    trace!("back_sub(m={})", m);

    let mut x = DVector::<T>::zeros(m);
    for row in (0..m).rev() {
        let pivot = mat_u[(row, row)];
        if pivot == T::zero() {
            return Err(Error::SingularMatrix { col: row });
        }

        let mut sum = y[row];
        for i in (row + 1)..m {
            sum -= mat_u[(row, i)] * x[i];
        }
        x[row] = sum / pivot;
    }
    Ok(x)
}
