use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;

use crate::error::MatrixError;
use crate::math::zeroed_buffer;

/// Absolute per-component tolerance used by [`Vector::approx_eq`].
pub const VECTOR_EQ_TOLERANCE: f64 = 1e-10;

/// Fixed-length vector of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create a zero-filled vector of length `len`.
    pub fn zeros(len: usize) -> Result<Self, MatrixError> {
        if len == 0 {
            return Err(MatrixError::InvalidSize { rows: len, cols: 1 });
        }
        Ok(Self {
            data: zeroed_buffer(len)?,
        })
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// `n` evenly spaced points from `start` to `end` inclusive.
    ///
    /// A single point is just `start`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, MatrixError> {
        let mut v = Vector::zeros(n)?;
        for (i, slot) in v.data.iter_mut().enumerate() {
            *slot = linspace_point(start, end, n, i);
        }
        Ok(v)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Read component `i`. Out-of-range reads return NaN instead of panicking.
    pub fn get(&self, i: usize) -> f64 {
        self.data.get(i).copied().unwrap_or(f64::NAN)
    }

    /// Write component `i`. Out-of-range writes are ignored.
    pub fn set(&mut self, i: usize, value: f64) {
        if let Some(slot) = self.data.get_mut(i) {
            *slot = value;
        }
    }

    pub fn add(&self, other: &Vector) -> Result<Vector, MatrixError> {
        self.check_same_len("add", other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a + b).collect())
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector, MatrixError> {
        self.check_same_len("subtract", other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a - b).collect())
    }

    pub fn dot(&self, other: &Vector) -> Result<f64, MatrixError> {
        self.check_same_len("dot", other)?;
        Ok(dot_scalar_f64(self.as_slice(), other.as_slice()))
    }

    pub fn scale(&self, k: f64) -> Vector {
        self.iter().map(|v| k * v).collect()
    }

    /// Component-wise equality within [`VECTOR_EQ_TOLERANCE`].
    pub fn approx_eq(&self, other: &Vector) -> bool {
        self.approx_eq_with(other, VECTOR_EQ_TOLERANCE)
    }

    /// Component-wise equality: every `|a - b|` must be strictly below `tol`.
    /// Vectors of different length are never equal.
    pub fn approx_eq_with(&self, other: &Vector, tol: f64) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| (a - b).abs() < tol)
    }

    fn check_same_len(&self, op: &'static str, other: &Vector) -> Result<(), MatrixError> {
        if self.len() != other.len() {
            return Err(MatrixError::DimensionMismatch {
                op,
                left: (self.len(), 1),
                right: (other.len(), 1),
            });
        }
        Ok(())
    }
}

/// The `i`-th of `n` evenly spaced points between `start` and `end`.
pub(crate) fn linspace_point(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n < 2 {
        return start;
    }
    start + i as f64 * (end - start) / (n - 1) as f64
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, " {}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ",")?;
            }
        }
        write!(f, " ]")
    }
}
