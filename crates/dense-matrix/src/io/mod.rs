//! Adapters between matrices and text: delimited tables, bracketed
//! literals and printed output.

pub mod literal;
pub mod render;
pub mod table;

pub use literal::parse_matrix;
pub use render::{format_scientific, print_matrix, write_csv, write_csv_to};
pub use table::{read_csv, read_csv_from_reader, read_csv_with_config, TableReaderConfig};
