//! Class probability vectors produced by trees and by soft-vote averaging.

/// Class probability distribution, indexed by class id.
///
/// Entries are non-negative and sum to 1.0 within floating-point tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    probs: Vec<f64>,
}

impl ClassProbabilities {
    /// Create a new probability vector.
    pub(crate) fn new(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    /// Return the most probable class.
    ///
    /// Only a strictly greater probability replaces the current best, so
    /// ties resolve to the lowest class index. An empty vector yields 0.
    #[must_use]
    pub fn argmax(&self) -> usize {
        let mut best = 0usize;
        let mut best_prob = self.probs.first().copied().unwrap_or(0.0);
        for (class, &p) in self.probs.iter().enumerate().skip(1) {
            if p > best_prob {
                best_prob = p;
                best = class;
            }
        }
        best
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.probs.len()
    }

    /// Return the probability distribution as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Consume the distribution and return the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.probs
    }
}

#[cfg(test)]
mod tests {
    use super::ClassProbabilities;

    #[test]
    fn argmax_picks_strict_maximum() {
        let p = ClassProbabilities::new(vec![0.2, 0.5, 0.3]);
        assert_eq!(p.argmax(), 1);
    }

    #[test]
    fn argmax_tie_goes_to_lowest_index() {
        let p = ClassProbabilities::new(vec![0.25, 0.375, 0.375]);
        assert_eq!(p.argmax(), 1);
        let even = ClassProbabilities::new(vec![0.5, 0.5]);
        assert_eq!(even.argmax(), 0);
    }

    #[test]
    fn argmax_of_empty_is_zero() {
        assert_eq!(ClassProbabilities::new(vec![]).argmax(), 0);
    }

    #[test]
    fn into_vec_returns_entries() {
        let p = ClassProbabilities::new(vec![1.0, 0.0]);
        assert_eq!(p.n_classes(), 2);
        assert_eq!(p.into_vec(), vec![1.0, 0.0]);
    }
}
