use std::convert::TryFrom;
use std::ops::{Index, IndexMut, RangeBounds};

use crate::error::MatrixError;
use crate::math::vector::linspace_point;
use crate::math::zeroed_buffer;

/// Dense row-major matrix of `f64`.
///
/// Dimensions are fixed at construction. Operations that change shape always
/// return a new matrix; the few that mutate in place say so in their name.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            data: zeroed_buffer(len)?,
            rows,
            cols,
        })
    }

    pub fn ones(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let mut m = Matrix::zeros(rows, cols)?;
        m.data.iter_mut().for_each(|v| *v = 1.0);
        Ok(m)
    }

    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut m = Matrix::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, MatrixError> {
        let (rows, cols) = shape;
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::DimensionMismatch {
                op: "from_shape_vec",
                left: (rows, cols),
                right: (data.len(), 1),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// Build a matrix from nested rows. The widest row sets the column count;
    /// shorter rows are padded with zero.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut m = Matrix::zeros(rows.len(), ncols)?;
        for (r, row) in rows.iter().enumerate() {
            m.row_slice_mut(r)[..row.len()].copy_from_slice(row);
        }
        Ok(m)
    }

    /// `1 x n` row of evenly spaced points from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, MatrixError> {
        let mut m = Matrix::zeros(1, n)?;
        for (i, slot) in m.data.iter_mut().enumerate() {
            *slot = linspace_point(start, end, n, i);
        }
        Ok(m)
    }

    /// A matrix with `cols` columns and no rows. Only produced by filters
    /// such as `delete_nan_rows` that may reject every row.
    pub(crate) fn empty_rows(cols: usize) -> Self {
        Self::from_raw_parts(0, cols, Vec::new())
    }

    /// Assemble a matrix whose buffer length is already known to be
    /// `rows * cols`. Degenerate shapes are allowed here.
    pub(crate) fn from_raw_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Zero-filled result buffer for operations whose operands may have no
    /// rows. Unlike [`Matrix::zeros`], a zero dimension is accepted.
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::AllocationFailure { requested: usize::MAX })?;
        Ok(Self::from_raw_parts(rows, cols, zeroed_buffer(len)?))
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Read element `(row, col)`.
    ///
    /// Out-of-range reads return NaN rather than panicking. Use indexing for
    /// the panicking variant.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if !self.in_bounds(row, col) {
            return f64::NAN;
        }
        self.data[self.offset(row, col)]
    }

    /// Write element `(row, col)`. Out-of-range writes are silently ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if self.in_bounds(row, col) {
            let offset = self.offset(row, col);
            self.data[offset] = value;
        }
    }

    /// Add `delta` to element `(row, col)`, with the same forgiving bounds as [`Matrix::set`].
    pub fn add_to(&mut self, row: usize, col: usize, delta: f64) {
        if self.in_bounds(row, col) {
            let offset = self.offset(row, col);
            self.data[offset] += delta;
        }
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            let (ia, ib) = (self.offset(a, col), self.offset(b, col));
            self.data.swap(ia, ib);
        }
    }

    /// Copy the rows at `indices`, in the order given.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Matrix, MatrixError> {
        if let Some(&bad) = indices.iter().find(|&&row| row >= self.rows) {
            return Err(MatrixError::InvalidMatrix(format!(
                "row index {} out of range for {} rows",
                bad, self.rows
            )));
        }
        Ok(self.gather_rows(indices))
    }

    pub(crate) fn gather_rows(&self, indices: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &row in indices {
            data.extend_from_slice(self.row_slice(row));
        }
        Matrix::from_raw_parts(indices.len(), self.cols, data)
    }

    pub fn select_columns<R>(&self, range: R) -> Result<Matrix, MatrixError>
    where
        R: RangeBounds<usize>,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        if start >= end || end > self.cols {
            return Err(MatrixError::InvalidMatrix(format!(
                "column range {}..{} out of range for {} columns",
                start, end, self.cols
            )));
        }

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            data.extend_from_slice(&self.row_slice(row)[start..end]);
        }

        Ok(Matrix {
            data,
            rows: self.rows,
            cols: new_cols,
        })
    }

    /// Apply `f` to every element, in place.
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        self.data.iter_mut().for_each(|v| *v = f(*v));
    }

    /// Apply `f` to every element and return the result as a new matrix.
    pub fn map<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Same shape and every element within `tol` (absolute).
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidSize { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(MatrixError::AllocationFailure { requested: usize::MAX })
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(self.in_bounds(index.0, index.1), "matrix index out of bounds");
        &self.data[self.offset(index.0, index.1)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(self.in_bounds(index.0, index.1), "matrix index out of bounds");
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl From<&Matrix> for ndarray::Array2<f64> {
    fn from(value: &Matrix) -> Self {
        // Both layouts are row-major, so the buffer carries over unchanged.
        ndarray::Array2::from_shape_vec((value.rows, value.cols), value.data.clone())
            .unwrap_or_else(|_| unreachable!("matrix buffer always matches its shape"))
    }
}

impl TryFrom<ndarray::Array2<f64>> for Matrix {
    type Error = MatrixError;

    fn try_from(value: ndarray::Array2<f64>) -> Result<Self, Self::Error> {
        let (rows, cols) = value.dim();
        Matrix::from_shape_vec((rows, cols), value.iter().copied().collect())
    }
}
