//! Bracketed matrix literals such as `[1, 2; 3, 4]`.
use std::str::FromStr;

use crate::error::MatrixError;
use crate::math::Matrix;

/// Parse a literal of the form `[a, b, c; d, e, f]`.
///
/// Brackets are ignored, `;` separates rows and `,` separates values. Empty
/// rows and empty values are skipped. The widest row sets the column count
/// and shorter rows are padded with zero.
pub fn parse_matrix(raw: &str) -> Result<Matrix, MatrixError> {
    let cleaned: String = raw.chars().filter(|c| *c != '[' && *c != ']').collect();

    let mut rows = Vec::new();
    for row in cleaned.split(';').filter(|r| !r.trim().is_empty()) {
        let values = row
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| MatrixError::Parse(format!("invalid number '{}'", token)))
            })
            .collect::<Result<Vec<f64>, MatrixError>>()?;
        rows.push(values);
    }

    if rows.iter().all(Vec::is_empty) {
        return Err(MatrixError::Parse(format!("no values in '{}'", raw.trim())));
    }
    Matrix::from_rows(&rows)
}

impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_matrix(s)
    }
}
