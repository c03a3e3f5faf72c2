//! Small dense matrix primitives: transpose, determinant, and inverse.

use nalgebra::DMatrix;

use crate::error::{StatsError, StatsResult};

/// LU pivots at or below this fraction of the largest matrix entry are
/// treated as zero.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

/// Dense, heap-allocated `f64` matrix.
pub type Matrix = DMatrix<f64>;

/// Builds a matrix from row vectors.
///
/// # Errors
///
/// * `DimensionMismatch` - if a row's length differs from the first row's
///
/// # Examples
///
/// ```
/// use tabstat_stats::matrix;
///
/// let m = matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m[(1, 0)], 3.0);
/// ```
pub fn from_rows(rows: &[Vec<f64>]) -> StatsResult<Matrix> {
    let cols = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().find(|row| row.len() != cols) {
        return Err(StatsError::DimensionMismatch {
            left: cols,
            right: row.len(),
        });
    }
    Ok(Matrix::from_fn(rows.len(), cols, |r, c| rows[r][c]))
}

/// Row vectors of `m`, the inverse of [`from_rows`].
#[must_use]
pub fn to_rows(m: &Matrix) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

/// Reflects `m` across its diagonal.
#[must_use]
pub fn transpose(m: &Matrix) -> Matrix {
    m.transpose()
}

fn ensure_square(m: &Matrix) -> StatsResult<()> {
    if !m.is_square() {
        return Err(StatsError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(())
}

/// Determinant via LU decomposition with partial pivoting.
///
/// # Examples
///
/// ```
/// use tabstat_stats::matrix;
///
/// let m = matrix::from_rows(&[
///     vec![1.0, 2.0, 3.0],
///     vec![0.0, 4.0, 5.0],
///     vec![0.0, 0.0, 6.0],
/// ])
/// .unwrap();
/// assert!((matrix::determinant(&m).unwrap() - 24.0).abs() < 1e-9);
/// ```
pub fn determinant(m: &Matrix) -> StatsResult<f64> {
    ensure_square(m)?;
    Ok(m.clone().lu().determinant())
}

/// Inverse of a square, non-singular matrix.
///
/// # Errors
///
/// * `NotSquare` - if `m` is not square
/// * `SingularMatrix` - if an LU pivot is at most `SINGULARITY_EPSILON`
///   times the largest absolute entry of `m`
///
/// The test is relative, so uniformly scaling a matrix does not change
/// whether it is invertible.
pub fn inverse(m: &Matrix) -> StatsResult<Matrix> {
    ensure_square(m)?;
    let lu = m.clone().lu();
    let tolerance = SINGULARITY_EPSILON * m.amax();
    if lu.u().diagonal().iter().any(|pivot| pivot.abs() <= tolerance) {
        return Err(StatsError::SingularMatrix);
    }
    lu.try_inverse().ok_or(StatsError::SingularMatrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper_triangular() -> Matrix {
        from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![0.0, 4.0, 5.0],
            vec![0.0, 0.0, 6.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_transpose_swaps_off_diagonal() {
        let m = upper_triangular();
        let t = transpose(&m);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(t[(r, c)], m[(c, r)]);
            }
        }
        assert_eq!(t[(2, 0)], 3.0);
        assert_eq!(t[(0, 2)], 0.0);
    }

    #[test]
    fn test_transpose_rectangular() {
        let m = from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = transpose(&m);
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(to_rows(&t), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn test_determinant() {
        assert!((determinant(&upper_triangular()).unwrap() - 24.0).abs() < 1e-9);
        let m = from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert!((determinant(&m).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_times_original_is_identity() {
        let m = upper_triangular();
        let inv = inverse(&m).unwrap();
        let identity = Matrix::identity(3, 3);
        for product in [&inv * &m, &m * &inv] {
            for (a, b) in product.iter().zip(identity.iter()) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse_of_small_scale_matrix() {
        let m = Matrix::identity(3, 3) * 1e-5;
        let inv = inverse(&m).unwrap();
        for (a, b) in inv.iter().zip((Matrix::identity(3, 3) * 1e5).iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        let product = &m * &inv;
        for (a, b) in product.iter().zip(Matrix::identity(3, 3).iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_singularity_ignores_scale() {
        for scale in [1e-20, 1.0, 1e20] {
            let singular = from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap() * scale;
            assert_eq!(inverse(&singular), Err(StatsError::SingularMatrix));

            let nearly = from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0 + 1e-14]]).unwrap() * scale;
            assert_eq!(inverse(&nearly), Err(StatsError::SingularMatrix));
        }
        assert_eq!(inverse(&Matrix::zeros(2, 2)), Err(StatsError::SingularMatrix));
    }

    #[test]
    fn test_errors() {
        let rect = from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert_eq!(
            determinant(&rect),
            Err(StatsError::NotSquare { rows: 1, cols: 2 })
        );
        assert_eq!(
            inverse(&rect),
            Err(StatsError::NotSquare { rows: 1, cols: 2 })
        );

        let singular = from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(inverse(&singular), Err(StatsError::SingularMatrix));

        assert_eq!(
            from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(StatsError::DimensionMismatch { left: 2, right: 1 })
        );
    }
}
