//! Error types for report generation.

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while generating reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open or read the ledger, or to write a report file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A ledger row failed validation. The whole run is aborted: a skipped
    /// row would silently understate the collection totals.
    #[error("Malformed record at row {row}, field `{field}`: {message}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        message: String,
    },

    /// Scoring was requested for a device with no payment history
    #[error("Cannot score a device with an empty payment history")]
    EmptyHistory,

    /// The --as-of argument could not be parsed as a date
    #[error("Invalid --as-of date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Missing or unrecognized CLI arguments
    #[error("Usage: suspension-reports <payments.csv> <output-dir> [--as-of YYYY-MM-DD]")]
    Usage,
}
