//! Minor, determinant, adjugate and inverse by cofactor expansion.
//!
//! Cofactor expansion costs O(n!) so it is only meant for small matrices.
//! Orders above [`MAX_COFACTOR_ORDER`] are rejected up front instead of
//! running for minutes.
use crate::error::MatrixError;
use crate::math::matrix::Matrix;

/// Relative threshold below which a determinant or pivot counts as zero.
///
/// Determinants are compared against this factor times the product of the
/// row max-norms, pivots against this factor times the largest coefficient.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Largest order accepted by the cofactor routines.
pub const MAX_COFACTOR_ORDER: usize = 10;

impl Matrix {
    /// Remove `row` and `col`, returning the `(n-1) x (n-1)` submatrix.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, MatrixError> {
        let order = self.square_order("minor")?;
        if order <= 1 {
            return Err(MatrixError::InvalidMatrix(
                "minor requires an order of at least 2".to_string(),
            ));
        }
        if row >= order || col >= order {
            return Err(MatrixError::InvalidMatrix(format!(
                "minor index ({}, {}) out of range for order {}",
                row, col, order
            )));
        }
        Ok(self.minor_unchecked(row, col))
    }

    /// Determinant by expansion along the first row.
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.square_order("determinant")?;
        self.check_cofactor_order()?;
        Ok(self.expand_determinant())
    }

    /// Transposed matrix of cofactors, `C(i, j) = (-1)^(i+j) * det(minor(i, j))`.
    pub fn adjugate(&self) -> Result<Matrix, MatrixError> {
        let order = self.square_order("adjugate")?;
        self.check_cofactor_order()?;
        let mut cofactors = Matrix::zeros(order, order)?;
        if order == 1 {
            cofactors[(0, 0)] = 1.0;
            return Ok(cofactors);
        }
        for i in 0..order {
            for j in 0..order {
                let det = self.minor_unchecked(i, j).expand_determinant();
                cofactors[(i, j)] = sign(i + j) * det;
            }
        }
        Ok(cofactors.transpose())
    }

    /// Inverse as `adjugate / determinant`.
    ///
    /// The matrix counts as singular when `|det|` falls below
    /// [`SINGULAR_TOLERANCE`] times the product of its row max-norms, so the
    /// test does not depend on the overall scale of the entries.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        self.inverse_with_tolerance(SINGULAR_TOLERANCE)
    }

    /// Inverse with a caller-chosen relative singular tolerance.
    pub fn inverse_with_tolerance(&self, tol: f64) -> Result<Matrix, MatrixError> {
        let order = self.square_order("inverse")?;
        if order == 1 {
            let v = self[(0, 0)];
            if v == 0.0 || !v.is_finite() {
                log::debug!("inverse: 1x1 matrix with value {:e} is singular", v);
                return Err(MatrixError::SingularMatrix);
            }
            return Matrix::from_shape_vec((1, 1), vec![1.0 / v]);
        }

        let det = self.determinant()?;
        let threshold = tol * self.row_norm_product();
        // NaN determinants fail the comparison as well.
        if det == 0.0 || !(det.abs() >= threshold) {
            log::debug!("inverse: determinant {:e} below threshold {:e}", det, threshold);
            return Err(MatrixError::SingularMatrix);
        }
        Ok(self.adjugate()?.map(|v| v / det))
    }

    /// Product over rows of the largest absolute entry, an upper bound on
    /// `|det|` up to a factor of `n^(n/2)`.
    fn row_norm_product(&self) -> f64 {
        (0..self.nrows())
            .map(|row| self.row_slice(row).iter().fold(0.0_f64, |m, v| m.max(v.abs())))
            .product()
    }

    fn square_order(&self, op: &str) -> Result<usize, MatrixError> {
        if self.is_empty() {
            return Err(MatrixError::InvalidMatrix(format!("{} of an empty matrix", op)));
        }
        if !self.is_square() {
            return Err(MatrixError::InvalidMatrix(format!(
                "{} requires a square matrix, got {}x{}",
                op,
                self.nrows(),
                self.ncols()
            )));
        }
        Ok(self.nrows())
    }

    fn check_cofactor_order(&self) -> Result<(), MatrixError> {
        if self.nrows() > MAX_COFACTOR_ORDER {
            return Err(MatrixError::InvalidMatrix(format!(
                "order {} exceeds the cofactor expansion limit of {}",
                self.nrows(),
                MAX_COFACTOR_ORDER
            )));
        }
        Ok(())
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> Matrix {
        let order = self.nrows();
        let mut data = Vec::with_capacity((order - 1) * (order - 1));
        for i in (0..order).filter(|&i| i != row) {
            for j in (0..order).filter(|&j| j != col) {
                data.push(self[(i, j)]);
            }
        }
        Matrix::from_raw_parts(order - 1, order - 1, data)
    }

    fn expand_determinant(&self) -> f64 {
        let order = self.nrows();
        if order == 1 {
            return self[(0, 0)];
        }
        let mut result = 0.0;
        for i in 0..order {
            result += sign(i) * self[(0, i)] * self.minor_unchecked(0, i).expand_determinant();
        }
        result
    }
}

#[inline]
fn sign(k: usize) -> f64 {
    if k % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}
