//! Normalization of caller input into owned nalgebra storage, and the shape/pivot checks shared by
//! the reducers.

use nalgebra::{DMatrix, DVector, Dim, Matrix, RealField, Storage, U1};
use num_traits::Zero;

use crate::{constants::PIVOT_RTOL_FACTOR, AsMatrix, AsVector, Error};

impl<T, R, C, S> AsMatrix<T> for Matrix<T, R, C, S>
where
    T: RealField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        // both sides are column-major
        Ok(DMatrix::from_iterator(
            self.nrows(),
            self.ncols(),
            self.iter().copied(),
        ))
    }
}

impl<T, R, S> AsVector<T> for Matrix<T, R, U1, S>
where
    T: RealField + Copy,
    R: Dim,
    S: Storage<T, R, U1>,
{
    fn to_vector(&self) -> Result<DVector<T>, Error> {
        Ok(DVector::from_iterator(self.nrows(), self.iter().copied()))
    }
}

/// Builds a matrix from row-major nested rows, rejecting ragged input.
fn from_rows<T, Row>(rows: &[Row]) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
    Row: AsRef<[T]>,
{
    let ncols = rows.first().map_or(0, |r| r.as_ref().len());
    if let Some((row, r)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.as_ref().len() != ncols)
    {
        return Err(Error::Ragged {
            row,
            expected: ncols,
            got: r.as_ref().len(),
        });
    }
    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i].as_ref()[j]))
}

impl<T: RealField + Copy> AsMatrix<T> for [Vec<T>] {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        from_rows(self)
    }
}

impl<T: RealField + Copy> AsMatrix<T> for Vec<Vec<T>> {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        from_rows(self)
    }
}

impl<T: RealField + Copy, const C: usize> AsMatrix<T> for [[T; C]] {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        from_rows(self)
    }
}

impl<T: RealField + Copy, const R: usize, const C: usize> AsMatrix<T> for [[T; C]; R] {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        from_rows(self)
    }
}

// One-dimensional sequences are a single column.

impl<T: RealField + Copy> AsMatrix<T> for [T] {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        Ok(DMatrix::from_column_slice(self.len(), 1, self))
    }
}

impl<T: RealField + Copy> AsMatrix<T> for Vec<T> {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        self.as_slice().to_matrix()
    }
}

impl<T: RealField + Copy, const N: usize> AsMatrix<T> for [T; N] {
    fn to_matrix(&self) -> Result<DMatrix<T>, Error> {
        self.as_slice().to_matrix()
    }
}

impl<T: RealField + Copy> AsVector<T> for [T] {
    fn to_vector(&self) -> Result<DVector<T>, Error> {
        Ok(DVector::from_column_slice(self))
    }
}

impl<T: RealField + Copy> AsVector<T> for Vec<T> {
    fn to_vector(&self) -> Result<DVector<T>, Error> {
        self.as_slice().to_vector()
    }
}

impl<T: RealField + Copy, const N: usize> AsVector<T> for [T; N] {
    fn to_vector(&self) -> Result<DVector<T>, Error> {
        self.as_slice().to_vector()
    }
}

/// Returns `m` for a non-empty `m×m` matrix.
pub(crate) fn square_dim<T>(mat_a: &DMatrix<T>) -> Result<usize, Error> {
    let (rows, cols) = mat_a.shape();
    if rows != cols || rows == 0 {
        return Err(Error::NotSquare { rows, cols });
    }
    Ok(rows)
}

pub(crate) fn check_rows(expected: usize, got: usize) -> Result<(), Error> {
    if expected != got {
        return Err(Error::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Magnitude at or below which a pivot of `mat_a` is considered zero.
///
/// Scaled by the size and the largest entry of the original coefficient matrix, so a zero matrix
/// has a zero tolerance and any exact zero pivot is always caught.
pub(crate) fn pivot_tolerance<T: RealField + Copy>(mat_a: &DMatrix<T>) -> T {
    let m: T = nalgebra::convert(mat_a.nrows() as f64);
    let factor: T = nalgebra::convert(PIVOT_RTOL_FACTOR);
    factor * m * T::default_epsilon() * mat_a.amax()
}

pub(crate) fn is_zero_pivot<T: RealField + Copy>(pivot: T, tol: T) -> bool {
    pivot == T::zero() || pivot.abs() <= tol
}
