//! CSV sample-table reader with minimal structural validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::table::SampleTable;
use crate::IoError;

/// Reads a sample table from a CSV file.
///
/// Expected CSV format:
/// - Header row required
/// - Feature columns in any order, plus optional reserved label columns
///   (`label`, `python_label`, `go_label`, `fixed_go_label`)
/// - All rows must have the same number of columns as the header
///
/// Cells are not parsed here; feature parsing happens per row during
/// scoring, so a bad cell is reported with its row and column.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::NoFeatureColumns`] | Every header column is reserved |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::EmptyTable`] | Zero data rows after header |
pub struct TableReader {
    path: PathBuf,
}

impl TableReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`SampleTable`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SampleTable, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets our own InconsistentRowLength check fire
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header: Vec<String> = rdr
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(String::from)
            .collect();
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        let mut rows = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }
            rows.push(record.iter().map(String::from).collect());
        }

        let table = SampleTable::new(header, rows);
        if table.n_features() == 0 {
            return Err(IoError::NoFeatureColumns {
                path: self.path.clone(),
            });
        }
        if table.n_rows() == 0 {
            return Err(IoError::EmptyTable {
                path: self.path.clone(),
            });
        }

        info!(
            n_rows = table.n_rows(),
            n_features = table.n_features(),
            "sample table loaded"
        );
        Ok(table)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
