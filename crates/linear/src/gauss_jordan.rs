//! Gauss-Jordan reduction of `[A | B]` to reduced row-echelon form `[I | A^-1 B]`.

use approx::relative_eq;
use log::{debug, trace};
use nalgebra::{DMatrix, DVector, RealField};
use num_traits::Zero;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{IDENTITY_ATOL, IDENTITY_RTOL},
    dense::{check_rows, is_zero_pivot, pivot_tolerance, square_dim},
    AsMatrix, AsVector, Error,
};

/// What [`gauss_jordan`] should produce.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Target<T: RealField> {
    /// Solve `A x = b` for a single right-hand side.
    Solve(DVector<T>),
    /// Compute `A^-1` (the right-hand block is the identity).
    Invert,
}

impl<T: RealField + Copy> Target<T> {
    /// Picks the mode from a value-encoded right-hand side: a matrix approximately equal to the
    /// identity selects [`Target::Invert`], a single column selects [`Target::Solve`].
    ///
    /// Prefer constructing the variant directly; this exists for callers that only have `b`.
    pub fn infer<B>(b: &B) -> Result<Self, Error>
    where
        B: AsMatrix<T> + ?Sized,
    {
        let b = b.to_matrix()?;
        if is_identity(&b) {
            Ok(Target::Invert)
        } else if b.ncols() == 1 {
            Ok(Target::Solve(b.column(0).into_owned()))
        } else {
            Err(Error::DimensionMismatch {
                expected: 1,
                got: b.ncols(),
            })
        }
    }
}

/// Square, non-empty and approximately equal to the identity.
fn is_identity<T: RealField + Copy>(b: &DMatrix<T>) -> bool {
    let (rows, cols) = b.shape();
    if rows != cols || rows == 0 {
        return false;
    }
    let rtol: T = nalgebra::convert(IDENTITY_RTOL);
    let atol: T = nalgebra::convert(IDENTITY_ATOL);
    relative_eq!(
        *b,
        DMatrix::<T>::identity(rows, cols),
        epsilon = atol,
        max_relative = rtol
    )
}

/// Result of [`gauss_jordan`], matching the requested [`Target`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced<T: RealField> {
    Solution(DVector<T>),
    Inverse(DMatrix<T>),
}

impl<T: RealField> Reduced<T> {
    pub fn into_solution(self) -> Option<DVector<T>> {
        match self {
            Reduced::Solution(x) => Some(x),
            Reduced::Inverse(_) => None,
        }
    }

    pub fn into_inverse(self) -> Option<DMatrix<T>> {
        match self {
            Reduced::Inverse(inv) => Some(inv),
            Reduced::Solution(_) => None,
        }
    }
}

/// Reduces `[A | B]` to reduced row-echelon form and returns the solution or inverse.
///
/// Each pivot row is divided by its pivot, then column `row` is eliminated from every other row,
/// above and below. No rows are exchanged.
///
/// ## Errors
/// * `Err(Error::SingularMatrix)` when a pivot is numerically zero.
pub fn gauss_jordan<T, A>(a: &A, target: Target<T>) -> Result<Reduced<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
{
    let mat_a = a.to_matrix()?;
    let m = square_dim(&mat_a)?;

    match target {
        Target::Solve(b) => solve_column(&mat_a, &b).map(Reduced::Solution),
        Target::Invert => rref(&mat_a, &DMatrix::identity(m, m)).map(Reduced::Inverse),
    }
}

fn solve_column<T>(mat_a: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
{
    check_rows(mat_a.nrows(), b.nrows())?;
    let rhs = DMatrix::from_column_slice(b.nrows(), 1, b.as_slice());
    Ok(rref(mat_a, &rhs)?.column(0).into_owned())
}

/// Solves `A x = b` by Gauss-Jordan reduction.
pub fn gauss_jordan_solve<T, A, B>(a: &A, b: &B) -> Result<DVector<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
    B: AsVector<T> + ?Sized,
{
    let mat_a = a.to_matrix()?;
    square_dim(&mat_a)?;
    solve_column(&mat_a, &b.to_vector()?)
}

/// Computes `A^-1` by Gauss-Jordan reduction of `[A | I]`.
pub fn inverse<T, A>(a: &A) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
{
    let mat_a = a.to_matrix()?;
    let m = square_dim(&mat_a)?;
    rref(&mat_a, &DMatrix::identity(m, m))
}

/// Reduces `[A | B]` for an arbitrary `m×k` block `B`, returning `A^-1 B`.
pub fn gauss_jordan_reduce<T, A, B>(a: &A, b: &B) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
    B: AsMatrix<T> + ?Sized,
{
    rref(&a.to_matrix()?, &b.to_matrix()?)
}

fn rref<T>(mat_a: &DMatrix<T>, rhs: &DMatrix<T>) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
{
    let m = square_dim(mat_a)?;
    check_rows(m, rhs.nrows())?;
    let k = rhs.ncols();
    let n = m + k;
    trace!("gauss_jordan(m={}, k={})", m, k);

    let tol = pivot_tolerance(mat_a);

    let mut aug = DMatrix::<T>::zeros(m, n);
    aug.columns_mut(0, m).copy_from(mat_a);
    aug.columns_mut(m, k).copy_from(rhs);

    for row in 0..m {
        let pivot = aug[(row, row)];
        if is_zero_pivot(pivot, tol) {
            debug!("gauss_jordan: zero pivot {:?} in col {}", pivot, row);
            return Err(Error::SingularMatrix { col: row });
        }

        for j in 0..n {
            aug[(row, j)] /= pivot;
        }

        for i in (0..m).filter(|&i| i != row) {
            let factor = aug[(i, row)];
            if factor == T::zero() {
                continue;
            }
            for j in 0..n {
                let a_rj = aug[(row, j)];
                aug[(i, j)] -= factor * a_rj;
            }
        }
    }

    Ok(aug.columns(m, k).into_owned())
}
