use crate::error::MatrixError;
use crate::math::matrix::Matrix;
use crate::math::vector::Vector;

/// Stack vectors side by side as the columns of a new matrix.
///
/// The longest vector sets the row count; shorter columns keep zeros in
/// their trailing cells.
pub fn cat_column_vectors(columns: &[Vector]) -> Result<Matrix, MatrixError> {
    let rows = columns.iter().map(Vector::len).max().unwrap_or(0);
    let mut out = Matrix::zeros(rows, columns.len())?;
    for (col, v) in columns.iter().enumerate() {
        for (row, &value) in v.iter().enumerate() {
            out[(row, col)] = value;
        }
    }
    Ok(out)
}

/// X coordinates of the grid spanned by `x` (length m) and `y` (length n):
/// an `n x m` matrix whose every row is a copy of `x`.
pub fn meshgrid_x(x: &Vector, y: &Vector) -> Result<Matrix, MatrixError> {
    let mut out = Matrix::zeros(y.len(), x.len())?;
    for row in 0..y.len() {
        for (col, &value) in x.iter().enumerate() {
            out[(row, col)] = value;
        }
    }
    Ok(out)
}

/// Y coordinates of the grid spanned by `x` (length m) and `y` (length n):
/// an `n x m` matrix whose every column is a copy of `y`.
pub fn meshgrid_y(x: &Vector, y: &Vector) -> Result<Matrix, MatrixError> {
    let mut out = Matrix::zeros(y.len(), x.len())?;
    for (row, &value) in y.iter().enumerate() {
        for col in 0..x.len() {
            out[(row, col)] = value;
        }
    }
    Ok(out)
}

pub fn meshgrid(x: &Vector, y: &Vector) -> Result<(Matrix, Matrix), MatrixError> {
    Ok((meshgrid_x(x, y)?, meshgrid_y(x, y)?))
}
