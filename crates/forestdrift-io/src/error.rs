//! I/O error types for forestdrift-io.

use std::path::PathBuf;

use forestdrift_core::{ForestError, ModelError, ScalerError, VotePolicy};

/// Errors from artifact loading, sample-table I/O, and row scoring.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a JSON artifact is malformed or has the wrong shape.
    #[error("JSON parse error in {path}")]
    JsonParse {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// Returned when a model artifact's tree records are structurally invalid.
    #[error("invalid model in {path}")]
    InvalidModel {
        /// Path to the model file.
        path: PathBuf,
        /// The conversion error.
        source: ModelError,
    },

    /// Returned when a scaler artifact's parameters are invalid.
    #[error("invalid scaler in {path}")]
    InvalidScaler {
        /// Path to the scaler file.
        path: PathBuf,
        /// The validation error.
        source: ScalerError,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty table (no data rows) in {path}")]
    EmptyTable {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when every header column is a reserved label column.
    #[error("no feature columns in {path}")]
    NoFeatureColumns {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of cells than the header.
    #[error("inconsistent row length in {path}: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a feature cell cannot be parsed as a float.
    #[error("failed to parse float at row {row_index}, column {column} (\"{name}\"): raw value \"{raw}\"")]
    NonNumericValue {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based column index in the header.
        column: usize,
        /// Header name of the column.
        name: String,
        /// The raw cell text.
        raw: String,
    },

    /// Returned when standardizing a row fails.
    #[error("failed to scale row {row_index}")]
    RowScaling {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The scaler error.
        source: ScalerError,
    },

    /// Returned when predicting a row fails.
    #[error("failed to predict row {row_index} with {policy}")]
    RowPrediction {
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The vote policy that failed.
        policy: VotePolicy,
        /// The aggregation error.
        source: ForestError,
    },

    /// Returned when the output file cannot be created, written, or moved into place.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV writer fails to serialize a record.
    #[error("CSV write error for {path}")]
    CsvWrite {
        /// Path being written.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },
}
