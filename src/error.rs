use thiserror::Error;

/// Failures raised by the data layer and the analysis helpers.
///
/// I/O and parse errors are wrapped with `anyhow` context at the call site;
/// this enum covers the cases the crate itself detects.
#[derive(Debug, Error)]
pub enum EdaError {
    #[error("column not found: {column}")]
    MissingColumn { column: String },
    #[error("column '{column}' row {row}: '{value}' is not numeric")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column '{column}' row {row}: '{value}' is not a finite number")]
    NonFinite {
        column: String,
        row: usize,
        value: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("nothing to plot for {0}")]
    Empty(String),
}
