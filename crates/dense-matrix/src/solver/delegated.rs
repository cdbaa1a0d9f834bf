//! Delegation to a LAPACK-style `dgesv` routine.
//!
//! [`DelegatedSolver`] only converts between the crate's row-major matrices
//! and the column-major buffers the routine expects, then maps the routine's
//! `info` status onto [`MatrixError`]. Pivoting and numerical behavior belong
//! to the routine.
//!
//! [`ReferenceGesv`] is a pure-Rust implementation of the `dgesv` contract and
//! is always available. With the `lapack` feature, [`LapackGesv`] calls the
//! system LAPACK through the `lapack` crate.
use std::cmp::Ordering;
use std::convert::TryFrom;

use crate::error::MatrixError;
use crate::math::Matrix;
use crate::solver::{check_system, LinearSolver};

/// A dense solver with the `dgesv` calling convention.
///
/// Solves `A * X = B` where `a` is `n x n` with leading dimension `lda` and
/// `b` is `n x nrhs` with leading dimension `ldb`, both column-major. On exit
/// `a` holds the LU factors, `ipiv` the 1-based row interchanges and `b` the
/// solution. `info` is 0 on success, `-i` when argument `i` was invalid and
/// `i` when `U(i, i)` is exactly zero.
pub trait DenseRoutine {
    #[allow(clippy::too_many_arguments)]
    fn gesv(
        &self,
        n: i32,
        nrhs: i32,
        a: &mut [f64],
        lda: i32,
        ipiv: &mut [i32],
        b: &mut [f64],
        ldb: i32,
        info: &mut i32,
    );

    fn name(&self) -> &str {
        "dgesv"
    }
}

/// Solver strategy that hands the system to a [`DenseRoutine`].
#[derive(Debug, Clone, Default)]
pub struct DelegatedSolver<R = ReferenceGesv> {
    routine: R,
}

impl<R: DenseRoutine> DelegatedSolver<R> {
    pub fn new(routine: R) -> Self {
        Self { routine }
    }
}

impl<R: DenseRoutine> LinearSolver for DelegatedSolver<R> {
    fn solve(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
        let n = check_system(a, b)?;
        let nrhs = b.ncols();
        let n_i32 = to_lapack_int(n)?;
        let nrhs_i32 = to_lapack_int(nrhs)?;

        let mut a_buf = to_column_major(a);
        let mut b_buf = to_column_major(b);
        let mut ipiv = vec![0i32; n];
        let mut info = 0i32;

        log::trace!("{}: solving order {} system with {} right-hand side(s)", self.routine.name(), n, nrhs);
        self.routine.gesv(
            n_i32, nrhs_i32, &mut a_buf, n_i32, &mut ipiv, &mut b_buf, n_i32, &mut info,
        );

        match info.cmp(&0) {
            Ordering::Equal => Ok(from_column_major(n, nrhs, &b_buf)),
            Ordering::Less => Err(MatrixError::InvalidMatrix(format!(
                "{} rejected argument {}",
                self.routine.name(),
                -info
            ))),
            Ordering::Greater => {
                log::debug!("{}: U({}, {}) is exactly zero", self.routine.name(), info, info);
                Err(MatrixError::SingularMatrix)
            }
        }
    }

    fn name(&self) -> &str {
        self.routine.name()
    }
}

fn to_lapack_int(value: usize) -> Result<i32, MatrixError> {
    i32::try_from(value).map_err(|_| {
        MatrixError::InvalidMatrix(format!("dimension {} exceeds the routine's index range", value))
    })
}

/// Copy a matrix into a column-major buffer with leading dimension `nrows`.
pub fn to_column_major(m: &Matrix) -> Vec<f64> {
    let mut out = Vec::with_capacity(m.nrows() * m.ncols());
    for col in 0..m.ncols() {
        for row in 0..m.nrows() {
            out.push(m[(row, col)]);
        }
    }
    out
}

/// Rebuild a `rows x cols` matrix from a column-major buffer.
pub fn from_column_major(rows: usize, cols: usize, data: &[f64]) -> Matrix {
    let mut row_major = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            row_major.push(data[col * rows + row]);
        }
    }
    Matrix::from_raw_parts(rows, cols, row_major)
}

/// Pure-Rust `dgesv`: unblocked LU with partial pivoting followed by the
/// triangular solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGesv;

impl DenseRoutine for ReferenceGesv {
    #[allow(clippy::too_many_arguments)]
    fn gesv(
        &self,
        n: i32,
        nrhs: i32,
        a: &mut [f64],
        lda: i32,
        ipiv: &mut [i32],
        b: &mut [f64],
        ldb: i32,
        info: &mut i32,
    ) {
        *info = 0;
        if n < 0 {
            *info = -1;
        } else if nrhs < 0 {
            *info = -2;
        } else if lda < n.max(1) {
            *info = -4;
        } else if ldb < n.max(1) {
            *info = -7;
        } else if a.len() < (lda as usize) * (n as usize) {
            *info = -3;
        } else if ipiv.len() < n as usize {
            *info = -5;
        } else if b.len() < (ldb as usize) * (nrhs as usize) {
            *info = -6;
        }
        if *info != 0 || n == 0 {
            return;
        }

        let (n, nrhs) = (n as usize, nrhs as usize);
        let (lda, ldb) = (lda as usize, ldb as usize);
        let at = |r: usize, c: usize| r + c * lda;

        // Factor: P * A = L * U
        for j in 0..n {
            let mut p = j;
            let mut max_val = a[at(j, j)].abs();
            for i in (j + 1)..n {
                if a[at(i, j)].abs() > max_val {
                    max_val = a[at(i, j)].abs();
                    p = i;
                }
            }
            ipiv[j] = (p + 1) as i32;

            if a[at(p, j)] != 0.0 {
                if p != j {
                    for c in 0..n {
                        a.swap(at(j, c), at(p, c));
                    }
                }
                let pivot = a[at(j, j)];
                for i in (j + 1)..n {
                    a[at(i, j)] /= pivot;
                }
            } else if *info == 0 {
                *info = (j + 1) as i32;
            }

            for c in (j + 1)..n {
                let ujc = a[at(j, c)];
                if ujc == 0.0 {
                    continue;
                }
                for i in (j + 1)..n {
                    a[at(i, c)] -= a[at(i, j)] * ujc;
                }
            }
        }
        if *info != 0 {
            return;
        }

        // Solve L * U * X = P * B, one right-hand side at a time.
        for k in 0..nrhs {
            let col = &mut b[k * ldb..k * ldb + n];
            for i in 0..n {
                let p = (ipiv[i] - 1) as usize;
                if p != i {
                    col.swap(i, p);
                }
            }
            for j in 0..n {
                let bj = col[j];
                if bj != 0.0 {
                    for i in (j + 1)..n {
                        col[i] -= bj * a[at(i, j)];
                    }
                }
            }
            for j in (0..n).rev() {
                col[j] /= a[at(j, j)];
                let bj = col[j];
                if bj != 0.0 {
                    for i in 0..j {
                        col[i] -= bj * a[at(i, j)];
                    }
                }
            }
        }
    }

    fn name(&self) -> &str {
        "reference_dgesv"
    }
}

/// `dgesv` from the system LAPACK library.
#[cfg(feature = "lapack")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackGesv;

#[cfg(feature = "lapack")]
impl DenseRoutine for LapackGesv {
    #[allow(clippy::too_many_arguments)]
    fn gesv(
        &self,
        n: i32,
        nrhs: i32,
        a: &mut [f64],
        lda: i32,
        ipiv: &mut [i32],
        b: &mut [f64],
        ldb: i32,
        info: &mut i32,
    ) {
        // SAFETY: buffer sizes are derived from n, nrhs, lda and ldb by the caller.
        unsafe { lapack::dgesv(n, nrhs, a, lda, ipiv, b, ldb, info) }
    }

    fn name(&self) -> &str {
        "lapack_dgesv"
    }
}
