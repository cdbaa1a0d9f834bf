//! Gauss-Jordan elimination with partial pivoting.
//!
//! The two phases are exposed separately and mutate a caller-owned augmented
//! matrix `[A | B]` in place. After both have run, the left block is the
//! identity and the right block holds the solution.
use crate::error::MatrixError;
use crate::math::{Matrix, SINGULAR_TOLERANCE};
use crate::solver::{check_system, LinearSolver};

/// Pure elimination strategy, no external routine involved.
#[derive(Debug, Clone)]
pub struct GaussianElimination {
    tolerance: f64,
}

impl GaussianElimination {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self::new(SINGULAR_TOLERANCE)
    }
}

impl LinearSolver for GaussianElimination {
    fn solve(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        let n = check_system(a, b)?;
        let mut augmented = a.augment(b)?;
        let threshold = pivot_threshold(&augmented, n, self.tolerance);
        forward_with_threshold(&mut augmented, n, threshold)?;
        reverse_with_threshold(&mut augmented, n, threshold)?;
        augmented.select_columns(n..)
    }

    fn name(&self) -> &str {
        "gaussian_elimination"
    }
}

/// Forward phase, in place.
///
/// For each pivot column `i` the row in `i..n` with the largest magnitude in
/// that column is swapped into row `i`, then column `i` is cleared from all
/// rows below it. `n` is the row count of `augmented`. A pivot below `tol`
/// times the largest coefficient magnitude is reported as singular.
pub fn forward_eliminate(augmented: &mut Matrix, tol: f64) -> Result<(), MatrixError> {
    let n = pivot_count(augmented)?;
    let threshold = pivot_threshold(augmented, n, tol);
    forward_with_threshold(augmented, n, threshold)
}

fn forward_with_threshold(augmented: &mut Matrix, n: usize, threshold: f64) -> Result<(), MatrixError> {
    let cols = augmented.ncols();

    for i in 0..n {
        let mut pivot_row = i;
        let mut max_val = augmented[(i, i)].abs();
        for row in (i + 1)..n {
            let candidate = augmented[(row, i)].abs();
            if candidate > max_val {
                max_val = candidate;
                pivot_row = row;
            }
        }

        if max_val == 0.0 || !(max_val >= threshold) {
            log::debug!("forward elimination: pivot {:e} in column {} below {:e}", max_val, i, threshold);
            return Err(MatrixError::SingularMatrix);
        }

        if pivot_row != i {
            log::trace!("forward elimination: swapping rows {} and {}", i, pivot_row);
            augmented.swap_rows(i, pivot_row);
        }

        let pivot = augmented.row_slice(i).to_vec();
        for row in (i + 1)..n {
            let factor = augmented[(row, i)] / pivot[i];
            if factor == 0.0 {
                continue;
            }
            let target = augmented.row_slice_mut(row);
            for col in (i + 1)..cols {
                target[col] -= factor * pivot[col];
            }
            target[i] = 0.0;
        }
    }

    Ok(())
}

/// Backward phase, in place. Expects the output of [`forward_eliminate`].
///
/// Walking from the last row up, each pivot is normalised to 1 and its column
/// is cleared from every row above. Pivots are checked against `tol` times the
/// largest coefficient magnitude of the matrix as passed in.
pub fn reverse_eliminate(augmented: &mut Matrix, tol: f64) -> Result<(), MatrixError> {
    let n = pivot_count(augmented)?;
    let threshold = pivot_threshold(augmented, n, tol);
    reverse_with_threshold(augmented, n, threshold)
}

fn reverse_with_threshold(augmented: &mut Matrix, n: usize, threshold: f64) -> Result<(), MatrixError> {
    let cols = augmented.ncols();

    for i in (0..n).rev() {
        let pivot_val = augmented[(i, i)];
        if pivot_val == 0.0 || !(pivot_val.abs() >= threshold) {
            log::debug!("reverse elimination: pivot {:e} in row {} below {:e}", pivot_val, i, threshold);
            return Err(MatrixError::SingularMatrix);
        }

        {
            let row = augmented.row_slice_mut(i);
            for v in row[i..].iter_mut() {
                *v /= pivot_val;
            }
            row[i] = 1.0;
        }

        let pivot = augmented.row_slice(i).to_vec();
        for row in 0..i {
            let factor = augmented[(row, i)];
            if factor == 0.0 {
                continue;
            }
            let target = augmented.row_slice_mut(row);
            for col in (i + 1)..cols {
                target[col] -= factor * pivot[col];
            }
            target[i] = 0.0;
        }
    }

    Ok(())
}

/// `tol` scaled by the largest magnitude in the leading `n x n` coefficient block.
fn pivot_threshold(augmented: &Matrix, n: usize, tol: f64) -> f64 {
    let scale = (0..n)
        .flat_map(|row| augmented.row_slice(row)[..n].iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    tol * scale
}

fn pivot_count(augmented: &Matrix) -> Result<usize, MatrixError> {
    let n = augmented.nrows();
    if n == 0 || augmented.ncols() < n {
        return Err(MatrixError::InvalidMatrix(format!(
            "augmented matrix must have at least as many columns as rows, got {}x{}",
            n,
            augmented.ncols()
        )));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_eliminate_pivots_largest_row() {
        let mut aug = Matrix::from_rows(&[vec![1.0, 1.0, 3.0], vec![4.0, 2.0, 10.0]]).unwrap();
        forward_eliminate(&mut aug, SINGULAR_TOLERANCE).unwrap();

        // The row with |4| in column 0 is swapped to the top.
        assert_eq!(aug.row_slice(0), &[4.0, 2.0, 10.0]);
        assert_eq!(aug[(1, 0)], 0.0);
        assert!((aug[(1, 1)] - 0.5).abs() < 1e-12);
        assert!((aug[(1, 2)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_eliminate_leaves_identity() {
        let mut aug = Matrix::from_rows(&[vec![2.0, 1.0, 3.0], vec![1.0, 1.0, 2.0]]).unwrap();
        forward_eliminate(&mut aug, SINGULAR_TOLERANCE).unwrap();
        reverse_eliminate(&mut aug, SINGULAR_TOLERANCE).unwrap();

        assert_eq!(aug[(0, 0)], 1.0);
        assert_eq!(aug[(0, 1)], 0.0);
        assert_eq!(aug[(1, 0)], 0.0);
        assert_eq!(aug[(1, 1)], 1.0);
        assert!((aug[(0, 2)] - 1.0).abs() < 1e-12);
        assert!((aug[(1, 2)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_pivot_is_reported() {
        let mut aug = Matrix::from_rows(&[vec![1.0, 2.0, 1.0], vec![2.0, 4.0, 2.0]]).unwrap();
        let err = forward_eliminate(&mut aug, SINGULAR_TOLERANCE).unwrap_err();
        assert_eq!(err, MatrixError::SingularMatrix);
    }

    #[test]
    fn test_pivot_check_scales_with_coefficients() {
        let mut tiny = Matrix::from_rows(&[vec![2e-13, 0.0, 2e-13], vec![0.0, 1e-13, 3e-13]]).unwrap();
        forward_eliminate(&mut tiny, SINGULAR_TOLERANCE).unwrap();
        reverse_eliminate(&mut tiny, SINGULAR_TOLERANCE).unwrap();
        assert!((tiny[(0, 2)] - 1.0).abs() < 1e-12);
        assert!((tiny[(1, 2)] - 3.0).abs() < 1e-12);

        // Second pivot is 1e-14 against a largest coefficient of 1.
        let mut nearly = Matrix::from_rows(&[vec![1.0, 1.0, 2.0], vec![1.0, 1.0 + 1e-14, 2.0]]).unwrap();
        assert_eq!(
            forward_eliminate(&mut nearly, SINGULAR_TOLERANCE).unwrap_err(),
            MatrixError::SingularMatrix
        );
    }

    #[test]
    fn test_narrow_augmented_matrix_is_rejected() {
        let mut aug = Matrix::zeros(3, 2).unwrap();
        assert!(matches!(
            forward_eliminate(&mut aug, SINGULAR_TOLERANCE),
            Err(MatrixError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_solve_multiple_right_hand_sides() {
        let a = Matrix::from_rows(&[vec![3.0, 2.0], vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![5.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let x = GaussianElimination::default().solve(&a, &b).unwrap();

        assert_eq!(x.shape(), (2, 2));
        let back = a.multiply(&x).unwrap();
        assert!(back.approx_eq(&b, 1e-12));
    }
}
