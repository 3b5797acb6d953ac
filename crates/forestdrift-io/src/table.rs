//! The sample table: a CSV header plus string cells, with label-column bookkeeping.

use crate::IoError;

/// Ground-truth label column written by the training side.
pub const TRUTH_COLUMN: &str = "label";
/// Reference prediction column written by the training side.
pub const REFERENCE_COLUMN: &str = "python_label";
/// Output column for the majority-hard-vote prediction on unscaled features.
pub const HARD_VOTE_COLUMN: &str = "go_label";
/// Output column for the soft-vote prediction on standardized features.
pub const SOFT_VOTE_COLUMN: &str = "fixed_go_label";

/// Columns that never carry features.
pub const RESERVED_COLUMNS: [&str; 4] = [
    TRUTH_COLUMN,
    REFERENCE_COLUMN,
    HARD_VOTE_COLUMN,
    SOFT_VOTE_COLUMN,
];

/// A row/column table read from CSV.
///
/// Cells are kept as the original strings so untouched columns are written
/// back byte-for-byte. Every column not named in [`RESERVED_COLUMNS`] is a
/// feature, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    feature_columns: Vec<usize>,
}

impl SampleTable {
    /// Create a table from a header and rows of equal length.
    pub(crate) fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == header.len()));
        let feature_columns = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !RESERVED_COLUMNS.contains(&name.as_str()))
            .map(|(i, _)| i)
            .collect();
        Self {
            header,
            rows,
            feature_columns,
        }
    }

    /// Return the header names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Return the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Return the number of data rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_columns.len()
    }

    /// Return the feature column names in header order.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        self.feature_columns
            .iter()
            .map(|&i| self.header[i].as_str())
            .collect()
    }

    /// Return the position of the first column named `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Return the cells of column `name`, top to bottom.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Parse the feature cells of row `row_index` as floats.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NonNumericValue`] for the first cell that does not
    /// parse as an `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `row_index >= n_rows()`.
    pub fn sample(&self, row_index: usize) -> Result<Vec<f64>, IoError> {
        let row = &self.rows[row_index];
        self.feature_columns
            .iter()
            .map(|&column| {
                let raw = &row[column];
                raw.parse::<f64>().map_err(|_| IoError::NonNumericValue {
                    row_index,
                    column,
                    name: self.header[column].clone(),
                    raw: raw.clone(),
                })
            })
            .collect()
    }

    /// Overwrite column `name` with `values`, appending it if absent.
    ///
    /// Re-running with the same values leaves the table unchanged, so
    /// repeated scoring never duplicates output columns.
    pub(crate) fn set_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.header.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}
