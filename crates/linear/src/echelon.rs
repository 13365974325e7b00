//! Row reduction of an augmented system `[A | B]` to row-echelon form, without pivoting.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector, RealField};
use num_traits::{One, Zero};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    dense::{check_rows, is_zero_pivot, pivot_tolerance, square_dim},
    AsMatrix, Error,
};

/// The implicit LU factorization produced by [`row_echelon`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RowEchelon<T: RealField> {
    /// Unit lower-triangular multiplier matrix, `L[(row, col)]` is the multiple of pivot row `col`
    /// subtracted from `row`.
    pub l: DMatrix<T>,
    /// Upper-triangular row-echelon coefficient block, `L * U == A`.
    pub u: DMatrix<T>,
    /// Transformed right-hand side(s), `L * y == B`. One column per right-hand side, never empty.
    pub y: DMatrix<T>,
}

impl<T: RealField + Copy> RowEchelon<T> {
    /// The size `m` of the factored system.
    pub fn dim(&self) -> usize {
        self.u.nrows()
    }

    /// The first transformed right-hand side as a vector.
    pub fn y_vector(&self) -> DVector<T> {
        self.y.column(0).into_owned()
    }

    /// `det(A)`, as the product of the pivots (`det(L) == 1`).
    pub fn determinant(&self) -> T {
        self.u
            .diagonal()
            .iter()
            .fold(T::one(), |acc, &pivot| acc * pivot)
    }
}

/// Reduces `[A | B]` to row-echelon form, recording the elimination multipliers.
///
/// For each `row = 1..m` and each `col < row`, the multiplier `aug[row,col] / aug[col,col]` is
/// stored in `L[row,col]` and that multiple of row `col` is subtracted from `row`. No rows are
/// exchanged.
///
/// ## Arguments
/// * `a` the square coefficient matrix `A`.
/// * `b` the right-hand side, a column vector or an `m×k` matrix.
///
/// ## Errors
/// * `Err(Error::NotSquare)` / `Err(Error::DimensionMismatch)` for badly shaped input.
/// * `Err(Error::SingularMatrix)` when a pivot is numerically zero.
pub fn row_echelon<T, A, B>(a: &A, b: &B) -> Result<RowEchelon<T>, Error>
where
    T: RealField + Copy,
    A: AsMatrix<T> + ?Sized,
    B: AsMatrix<T> + ?Sized,
{
    reduce(&a.to_matrix()?, &b.to_matrix()?)
}

pub(crate) fn reduce<T>(mat_a: &DMatrix<T>, rhs: &DMatrix<T>) -> Result<RowEchelon<T>, Error>
where
    T: RealField + Copy,
{
    let m = square_dim(mat_a)?;
    check_rows(m, rhs.nrows())?;
    let k = rhs.ncols();
    if k == 0 {
        return Err(Error::DimensionMismatch {
            expected: 1,
            got: 0,
        });
    }
    trace!("row_echelon(m={}, k={})", m, k);

    let tol = pivot_tolerance(mat_a);

    // private working copy of [A | B]
    let mut aug = DMatrix::<T>::zeros(m, m + k);
    aug.columns_mut(0, m).copy_from(mat_a);
    aug.columns_mut(m, k).copy_from(rhs);

    let mut mat_l = DMatrix::<T>::identity(m, m);

    for row in 0..m {
        for col in 0..row {
            let mult = aug[(row, col)] / aug[(col, col)];
            mat_l[(row, col)] = mult;

            // aug[row] = aug[row] - mult * aug[col]. Entries left of `col` are already zero in
            // both rows, and the entry at `col` is eliminated by construction.
            aug[(row, col)] = T::zero();
            if mult != T::zero() {
                for j in (col + 1)..(m + k) {
                    let a_cj = aug[(col, j)];
                    aug[(row, j)] -= mult * a_cj;
                }
            }
        }

        // Row `row` is final; its pivot is used by every later row.
        if is_zero_pivot(aug[(row, row)], tol) {
            debug!("row_echelon: zero pivot {:?} in col {}", aug[(row, row)], row);
            return Err(Error::SingularMatrix { col: row });
        }
    }

    Ok(RowEchelon {
        l: mat_l,
        u: aug.columns(0, m).into_owned(),
        y: aug.columns(m, k).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector, matrix, vector};

    use super::*;

    #[test]
    fn test_ref_scenario1() {
        let mat_a = matrix![
            10.0, 3.0, 9.0;
            7.0, 3.0, 5.0;
            0.0, 4.0, 7.0;
        ];
        let b = vector![1.0, 1.0, 1.0];

        let rf = row_echelon(&mat_a, &b).unwrap();

        let expect_l = dmatrix![
            1.0, 0.0, 0.0;
            0.7, 1.0, 0.0;
            0.0, 4.0 / 0.9, 1.0;
        ];
        assert_relative_eq!(rf.l, expect_l, max_relative = 1e-12);
        assert_relative_eq!(rf.u[(1, 1)], 0.9, max_relative = 1e-12);
        assert_relative_eq!(rf.u[(1, 2)], -1.3, max_relative = 1e-12);
        assert_relative_eq!(rf.u[(2, 2)], 7.0 + 1.3 * 4.0 / 0.9, max_relative = 1e-12);

        // L is unit lower triangular, U upper triangular
        for row in 0..3 {
            assert_eq!(rf.l[(row, row)], 1.0);
            for col in (row + 1)..3 {
                assert_eq!(rf.l[(row, col)], 0.0);
            }
            for col in 0..row {
                assert_eq!(rf.u[(row, col)], 0.0);
            }
        }

        assert_relative_eq!(&rf.l * &rf.u, mat_a.to_matrix().unwrap(), max_relative = 1e-9);
        assert_relative_eq!(&rf.l * &rf.y, dmatrix![1.0; 1.0; 1.0], max_relative = 1e-9);
        assert_relative_eq!(rf.determinant(), 115.0, max_relative = 1e-9);
    }

    #[test]
    fn test_ref_4x4() {
        let mat_a = dmatrix![
            4.0, 2.0, 6.0, 2.0;
            6.0, 7.0, 2.0, 1.0;
            3.0, 7.0, 1.0, 4.0;
            1.0, 6.0, 2.0, 8.0;
        ];
        let b = dvector![1.0, 1.0, 1.0, 1.0];

        let rf = row_echelon(&mat_a, &b).unwrap();
        assert_eq!(rf.dim(), 4);
        assert_relative_eq!(&rf.l * &rf.u, mat_a, max_relative = 1e-9);
        assert_relative_eq!(&rf.l * rf.y_vector(), b, max_relative = 1e-9);
        assert_relative_eq!(
            rf.determinant(),
            mat_a.determinant(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_ref_matrix_rhs() {
        let mat_a: Vec<Vec<f64>> = vec![vec![2.0, 1.0], vec![4.0, 5.0]];
        let ident = DMatrix::<f64>::identity(2, 2);

        let rf = row_echelon(&mat_a, &ident).unwrap();
        // With B = I the transformed right-hand side is L^-1.
        assert_relative_eq!(&rf.l * &rf.y, ident, max_relative = 1e-12);
        assert_eq!(rf.u, dmatrix![2.0, 1.0; 0.0, 3.0]);
    }

    #[test]
    fn test_ref_sequence_rhs() {
        let mat_a: Vec<Vec<f64>> = vec![vec![2.0, 1.0], vec![4.0, 5.0]];

        let rf = row_echelon(&mat_a, &[3.0, 9.0]).unwrap();
        assert_eq!(rf.y, dmatrix![3.0; 3.0]);
        assert_eq!(rf.y_vector(), dvector![3.0, 3.0]);

        let b: Vec<f64> = vec![3.0, 9.0];
        assert_eq!(row_echelon(&mat_a, &b).unwrap(), rf);
        assert_eq!(row_echelon(&mat_a, &b[..]).unwrap(), rf);
    }

    #[test]
    fn test_ref_empty_rhs() {
        let ident = DMatrix::<f64>::identity(2, 2);
        assert_eq!(
            row_echelon(&ident, &DMatrix::<f64>::zeros(2, 0)),
            Err(Error::DimensionMismatch {
                expected: 1,
                got: 0
            })
        );
    }

    #[test]
    fn test_ref_does_not_touch_input() {
        let mat_a = dmatrix![2.0, 1.0; 4.0, 5.0];
        let b = dvector![3.0, 9.0];
        let _ = row_echelon(&mat_a, &b).unwrap();
        assert_eq!(mat_a, dmatrix![2.0, 1.0; 4.0, 5.0]);
        assert_eq!(b, dvector![3.0, 9.0]);
    }

    #[test]
    fn test_ref_singular() {
        let dup = matrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
            1.0, 2.0, 3.0;
        ];
        let b = vector![1.0, 1.0, 1.0];
        assert_eq!(
            row_echelon(&dup, &b),
            Err(Error::SingularMatrix { col: 2 })
        );

        let zero = DMatrix::<f64>::zeros(3, 3);
        assert_eq!(
            row_echelon(&zero, &b),
            Err(Error::SingularMatrix { col: 0 })
        );
    }

    #[test]
    fn test_ref_shapes() {
        let b = dvector![1.0, 1.0];
        assert_eq!(
            row_echelon(&DMatrix::<f64>::zeros(2, 3), &b),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(
            row_echelon(&DMatrix::<f64>::identity(3, 3), &b),
            Err(Error::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
    }
}
