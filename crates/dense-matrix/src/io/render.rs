use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::math::Matrix;

/// Magnitudes below this print as zero in [`Matrix`]'s `Display` output.
pub const DISPLAY_ZERO_THRESHOLD: f64 = 1e-14;

/// Format `v` in C-style scientific notation, e.g. `1.500000e+00`.
pub fn format_scientific(v: f64, decimal_places: usize) -> String {
    let s = format!("{:.*e}", decimal_places, v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

impl fmt::Display for Matrix {
    /// One bracketed row per line with values in scientific notation.
    /// Values that are annoyingly close to zero print as zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.nrows() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "[ ")?;
            for &v in self.row_slice(row) {
                let shown = if v.abs() < DISPLAY_ZERO_THRESHOLD { 0.0 } else { v };
                write!(f, "{} ", format_scientific(shown, 6))?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Print a matrix to stdout, one row per line.
pub fn print_matrix(matrix: &Matrix) {
    println!("{}", matrix);
}

/// Write comma-separated rows in scientific notation, without zero snapping.
pub fn write_csv_to<W: Write>(matrix: &Matrix, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in 0..matrix.nrows() {
        wtr.write_record(matrix.row_slice(row).iter().map(|&v| format_scientific(v, 6)))
            .with_context(|| format!("Failed to write row {}", row + 1))?;
    }
    wtr.flush().context("Failed to flush matrix output")?;
    Ok(())
}

pub fn write_csv<P: AsRef<Path>>(matrix: &Matrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_csv_to(matrix, file)?;
    log::debug!("Wrote {}x{} matrix to {}", matrix.nrows(), matrix.ncols(), path.display());
    Ok(())
}
