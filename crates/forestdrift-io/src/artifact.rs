//! JSON readers for the exported model and scaler artifacts.

use std::path::{Path, PathBuf};

use forestdrift_core::{Forest, StandardScaler, TreeArrays};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads a forest from a JSON array of parallel-array tree records.
///
/// Expected format: `[{"children_left": [...], "children_right": [...],
/// "feature": [...], "threshold": [...], "value": [[...], ...]}, ...]`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Malformed JSON or missing fields |
/// | [`IoError::InvalidModel`] | A tree record fails structural validation |
pub struct ForestReader {
    path: PathBuf,
}

impl ForestReader {
    /// Create a new reader for the given model file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read, parse, and convert the model artifact.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Forest, IoError> {
        let records: Vec<TreeArrays> = read_json(&self.path)?;
        debug!(n_records = records.len(), "model records parsed");

        let forest = Forest::from_arrays(&records).map_err(|e| IoError::InvalidModel {
            path: self.path.clone(),
            source: e,
        })?;

        info!(
            n_trees = forest.n_trees(),
            n_classes = ?forest.n_classes(),
            "forest loaded"
        );
        Ok(forest)
    }
}

/// Reads standardization parameters from a `{"mean": [...], "scale": [...]}` record.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Malformed JSON or missing fields |
/// | [`IoError::InvalidScaler`] | `mean`/`scale` lengths differ or a scale is zero |
pub struct ScalerReader {
    path: PathBuf,
}

impl ScalerReader {
    /// Create a new reader for the given scaler file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the scaler artifact.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<StandardScaler, IoError> {
        let record: ScalerRecord = read_json(&self.path)?;
        let scaler =
            StandardScaler::new(record.mean, record.scale).map_err(|e| IoError::InvalidScaler {
                path: self.path.clone(),
                source: e,
            })?;

        info!(n_features = scaler.n_features(), "scaler loaded");
        Ok(scaler)
    }
}

/// Raw scaler record, validated separately so errors keep their own variant.
#[derive(serde::Deserialize)]
struct ScalerRecord {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| IoError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}
