//! Delimited numeric table reader.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::math::Matrix;

/// Configuration for reading delimited numeric tables.
#[derive(Debug, Clone)]
pub struct TableReaderConfig {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Number of leading records (headers, comments) to drop.
    pub skip_rows: usize,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
        }
    }
}

/// Read a comma-separated file into a matrix, dropping the first `skip_rows` records.
pub fn read_csv<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<Matrix> {
    let config = TableReaderConfig {
        skip_rows,
        ..TableReaderConfig::default()
    };
    read_csv_with_config(path, &config)
}

/// Read a delimited file into a matrix using a custom configuration.
pub fn read_csv_with_config<P: AsRef<Path>>(path: P, config: &TableReaderConfig) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open table file: {}", path.display()))?;
    let matrix = read_csv_from_reader(file, config)
        .with_context(|| format!("Failed to load table from {}", path.display()))?;
    log::debug!(
        "Loaded {}x{} matrix from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(matrix)
}

/// Read delimited numeric rows from any reader.
///
/// The first data row fixes the column count. Later rows that are longer
/// lose their extra fields; shorter rows are padded with NaN. Empty or
/// non-numeric fields also become NaN.
pub fn read_csv_from_reader<R: Read>(reader: R, config: &TableReaderConfig) -> Result<Matrix> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut ncols: Option<usize> = None;
    let mut values = Vec::new();
    let mut nrows = 0usize;
    let mut truncated_rows = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if row_idx < config.skip_rows {
            continue;
        }

        let width = *ncols.get_or_insert(record.len());
        if record.len() > width {
            truncated_rows += 1;
        }

        for col in 0..width {
            values.push(record.get(col).map_or(f64::NAN, parse_field));
        }
        nrows += 1;
    }

    if truncated_rows > 0 {
        log::warn!(
            "{} row(s) had more than {} fields; extra fields were dropped",
            truncated_rows,
            ncols.unwrap_or(0)
        );
    }

    let matrix = Matrix::from_shape_vec((nrows, ncols.unwrap_or(0)), values)
        .context("Table contains no data rows")?;
    Ok(matrix)
}

fn parse_field(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
