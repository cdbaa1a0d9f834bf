//! Linear system solvers for `A * X = B`.
//!
//! Two interchangeable strategies implement [`LinearSolver`]:
//! [`GaussianElimination`] works directly on the augmented matrix, while
//! [`DelegatedSolver`] marshals the system into a `dgesv`-style
//! [`DenseRoutine`]. [`build_solver`] picks one from a [`SolverConfig`].
//!
//! [`SolverConfig`]: crate::config::SolverConfig
pub mod delegated;
pub mod elimination;
pub mod factory;

pub use delegated::{DelegatedSolver, DenseRoutine, ReferenceGesv};
#[cfg(feature = "lapack")]
pub use delegated::LapackGesv;
pub use elimination::{forward_eliminate, reverse_eliminate, GaussianElimination};
pub use factory::build_solver;

use crate::error::MatrixError;
use crate::math::Matrix;

/// Contract shared by every solving strategy.
pub trait LinearSolver {
    /// Solve `a * x = b` for `x`. `a` must be square of order n and `b` must
    /// have n rows; the result has the shape of `b`.
    fn solve(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError>;

    /// Optional human readable name for the strategy
    fn name(&self) -> &str {
        "solver"
    }
}

/// Validate the shapes of a system and return its order.
pub(crate) fn check_system(a: &Matrix, b: &Matrix) -> Result<usize, MatrixError> {
    if a.is_empty() || !a.is_square() {
        return Err(MatrixError::InvalidMatrix(format!(
            "coefficient matrix must be square and non-empty, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    if b.is_empty() || b.nrows() != a.nrows() {
        return Err(MatrixError::DimensionMismatch {
            op: "solve",
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(a.nrows())
}
