//! dense-matrix: small dense matrix and vector toolkit.
//!
//! This crate provides owned `f64` matrix and vector types with forgiving
//! element access, the usual arithmetic, cofactor-based determinants and
//! inverses, and two interchangeable linear solvers (Gaussian elimination and
//! a `dgesv`-style delegated routine). Thin adapters read delimited tables,
//! parse bracketed literals and render matrices as text.
//!
//! The design favors small, testable modules with feature flags to avoid
//! requiring native dependencies (e.g., a system LAPACK) unless explicitly enabled.
pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod solver;

pub use error::MatrixError;
pub use math::{Matrix, Vector};
