//! Per-feature standardization, as fitted by scikit-learn's `StandardScaler`.

use crate::error::ScalerError;

/// Fitted standardization parameters: one `mean` and `scale` per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ScalerError::ParameterLengthMismatch`] | `mean.len() != scale.len()` |
    /// | [`ScalerError::InvalidScale`] | a `scale` entry is zero, NaN, or infinite |
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScalerError> {
        if mean.len() != scale.len() {
            return Err(ScalerError::ParameterLengthMismatch {
                mean_len: mean.len(),
                scale_len: scale.len(),
            });
        }
        if let Some((feature_index, &value)) = scale
            .iter()
            .enumerate()
            .find(|(_, s)| **s == 0.0 || !s.is_finite())
        {
            return Err(ScalerError::InvalidScale {
                feature_index,
                value,
            });
        }
        Ok(Self { mean, scale })
    }

    /// Standardize a sample: `(x[i] - mean[i]) / scale[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScalerError::LengthMismatch`] when `sample.len()` differs
    /// from [`StandardScaler::n_features`].
    pub fn transform(&self, sample: &[f64]) -> Result<Vec<f64>, ScalerError> {
        if sample.len() != self.mean.len() {
            return Err(ScalerError::LengthMismatch {
                expected: self.mean.len(),
                got: sample.len(),
            });
        }
        Ok(sample
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    /// Return the number of features the scaler was fitted on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Return the per-feature means.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Return the per-feature scales.
    #[must_use]
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}
