//! Atomic CSV writer for the scored sample table.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::table::SampleTable;
use crate::IoError;

/// Writes a [`SampleTable`] back to CSV.
///
/// The table is written to a temporary file in the destination directory
/// and renamed over the target only once every record is flushed, so a
/// failure never leaves a partially written table behind.
pub struct TableWriter {
    path: PathBuf,
}

impl TableWriter {
    /// Create a new writer targeting `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Write the header and every row, then move the file into place.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::WriteFile`] | temp file creation, flush, permission copy, or rename failed |
    /// | [`IoError::CsvWrite`] | a record could not be serialized |
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write(&self, table: &SampleTable) -> Result<(), IoError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        debug!(tmp = %tmp.path().display(), "staging output");

        {
            let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
            wtr.write_record(table.header())
                .map_err(|e| self.csv_error(e))?;
            for row in table.rows() {
                wtr.write_record(row).map_err(|e| self.csv_error(e))?;
            }
            wtr.flush().map_err(|e| self.write_error(e))?;
        }

        // Keep the mode of a file being rewritten in place.
        match std::fs::metadata(&self.path) {
            Ok(existing) => tmp
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| self.write_error(e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.write_error(e)),
        }

        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        info!(n_rows = table.n_rows(), "sample table written");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> IoError {
        IoError::WriteFile {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> IoError {
        IoError::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}
