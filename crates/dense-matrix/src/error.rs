use std::error::Error;
use std::fmt;

/// Errors raised by matrix construction, arithmetic and solving.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// A zero dimension was requested at construction time.
    InvalidSize { rows: usize, cols: usize },
    /// Operand shapes are incompatible for the named operation.
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The matrix cannot be used for the requested operation (non-square, too small, ...).
    InvalidMatrix(String),
    /// A determinant or pivot fell below the singular tolerance.
    SingularMatrix,
    /// Element storage could not be reserved.
    AllocationFailure { requested: usize },
    /// A bracketed matrix literal could not be parsed.
    Parse(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::InvalidSize { rows, cols } => {
                write!(f, "invalid matrix size ({}, {}): dimensions must be non-zero", rows, cols)
            }
            MatrixError::DimensionMismatch { op, left, right } => write!(
                f,
                "incompatible dimensions for {}: ({}, {}) and ({}, {})",
                op, left.0, left.1, right.0, right.1
            ),
            MatrixError::InvalidMatrix(reason) => write!(f, "invalid matrix: {}", reason),
            MatrixError::SingularMatrix => write!(f, "matrix is singular or nearly singular"),
            MatrixError::AllocationFailure { requested } => {
                write!(f, "failed to allocate storage for {} elements", requested)
            }
            MatrixError::Parse(msg) => write!(f, "failed to parse matrix literal: {}", msg),
        }
    }
}

impl Error for MatrixError {}
