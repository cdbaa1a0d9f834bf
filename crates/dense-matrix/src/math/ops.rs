//! Matrix arithmetic and row/column manipulation.
//!
//! The named methods are the fallible API and report shape problems as
//! [`MatrixError::DimensionMismatch`]. The `std::ops` impls on references are
//! shorthand for the same methods and panic on mismatched shapes, the way
//! `ndarray` operators do.
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::MatrixError;
use crate::math::matrix::Matrix;
use crate::math::vector::Vector;

impl Matrix {
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(rows * cols);
        for col in 0..cols {
            for row in 0..rows {
                data.push(self[(row, col)]);
            }
        }
        Matrix::from_raw_parts(cols, rows, data)
    }

    /// Matrix product `self * rhs`.
    ///
    /// Each element is accumulated left to right over the shared dimension.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncols() != rhs.nrows() {
            return Err(self.mismatch("multiply", rhs));
        }
        let mut out = Matrix::zeroed(self.nrows(), rhs.ncols())?;
        for i in 0..self.nrows() {
            for k in 0..rhs.ncols() {
                let mut acc = 0.0;
                for j in 0..self.ncols() {
                    acc += self[(i, j)] * rhs[(j, k)];
                }
                out[(i, k)] = acc;
            }
        }
        Ok(out)
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|v| k * v)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with("add", rhs, |a, b| a + b)
    }

    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with("subtract", rhs, |a, b| a - b)
    }

    /// Flip the sign of every element in place and hand the same matrix back.
    pub fn negate_in_place(&mut self) -> &mut Self {
        self.map_in_place(|v| -v);
        self
    }

    pub fn negated(&self) -> Matrix {
        self.map(|v| -v)
    }

    /// Element with the largest magnitude, scanning row-major.
    ///
    /// Ties keep the first element found; an all-zero matrix yields `0.0`.
    pub fn extremum(&self) -> f64 {
        self.as_slice()
            .iter()
            .fold(0.0_f64, |best, &v| if best.abs() < v.abs() { v } else { best })
    }

    /// Copy of column `col` as a `rows x 1` matrix. An out-of-range column
    /// reads as NaN.
    pub fn column(&self, col: usize) -> Matrix {
        let data = (0..self.nrows()).map(|row| self.get(row, col)).collect();
        Matrix::from_raw_parts(self.nrows(), 1, data)
    }

    /// Copy of row `row` as a `1 x cols` matrix. An out-of-range row reads as NaN.
    pub fn row(&self, row: usize) -> Matrix {
        let data = (0..self.ncols()).map(|col| self.get(row, col)).collect();
        Matrix::from_raw_parts(1, self.ncols(), data)
    }

    pub fn column_vector(&self, col: usize) -> Vector {
        (0..self.nrows()).map(|row| self.get(row, col)).collect()
    }

    pub fn row_vector(&self, row: usize) -> Vector {
        (0..self.ncols()).map(|col| self.get(row, col)).collect()
    }

    /// Place `rhs` to the right of `self`: `[self | rhs]`.
    pub fn augment(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.nrows() != rhs.nrows() {
            return Err(self.mismatch("augment", rhs));
        }
        let mut out = Matrix::zeroed(self.nrows(), self.ncols() + rhs.ncols())?;
        for row in 0..self.nrows() {
            let dest = out.row_slice_mut(row);
            dest[..self.ncols()].copy_from_slice(self.row_slice(row));
            dest[self.ncols()..].copy_from_slice(rhs.row_slice(row));
        }
        Ok(out)
    }

    /// Drop every row containing a NaN, keeping the remaining rows in order.
    ///
    /// The result has zero rows when every row contains a NaN.
    pub fn delete_nan_rows(&self) -> Matrix {
        let keep: Vec<usize> = (0..self.nrows())
            .filter(|&row| !self.row_slice(row).iter().any(|v| v.is_nan()))
            .collect();
        if keep.is_empty() {
            return Matrix::empty_rows(self.ncols());
        }
        self.gather_rows(&keep)
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Matrix, f: F) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }
        let data = self
            .as_slice()
            .iter()
            .zip(rhs.as_slice())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_raw_parts(self.nrows(), self.ncols(), data))
    }

    fn mismatch(&self, op: &'static str, rhs: &Matrix) -> MatrixError {
        MatrixError::DimensionMismatch {
            op,
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

impl<'a, 'b> Add<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn add(self, rhs: &'b Matrix) -> Self::Output {
        Matrix::add(self, rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<'a, 'b> Sub<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &'b Matrix) -> Self::Output {
        self.subtract(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &'b Matrix) -> Self::Output {
        self.multiply(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, k: f64) -> Self::Output {
        self.scale(k)
    }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}
