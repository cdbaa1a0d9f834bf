//! Dense `f64` containers and the algorithms built on them.
//!
//! `Matrix` (2D, row-major) and `Vector` (1D) are small owned containers.
//! Arithmetic lives in `ops`, vector/matrix assembly helpers in `assemble`
//! and the cofactor-based determinant/inverse engine in `cofactor`.
pub mod assemble;
pub mod cofactor;
pub mod matrix;
pub mod ops;
pub mod vector;

pub use assemble::{cat_column_vectors, meshgrid, meshgrid_x, meshgrid_y};
pub use cofactor::{MAX_COFACTOR_ORDER, SINGULAR_TOLERANCE};
pub use matrix::Matrix;
pub use vector::{Vector, VECTOR_EQ_TOLERANCE};

use crate::error::MatrixError;

/// Allocate a zero-filled buffer, reporting exhaustion instead of aborting.
pub(crate) fn zeroed_buffer(len: usize) -> Result<Vec<f64>, MatrixError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MatrixError::AllocationFailure { requested: len })?;
    data.resize(len, 0.0);
    Ok(data)
}
