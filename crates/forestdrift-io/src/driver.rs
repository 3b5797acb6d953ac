//! Row-by-row scoring of a sample table with both vote policies.

use forestdrift_core::{Forest, StandardScaler, VotePolicy};
use tracing::{debug, info, instrument};

use crate::table::{HARD_VOTE_COLUMN, SOFT_VOTE_COLUMN, SampleTable};
use crate::IoError;

/// Predictions produced for every row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredLabels {
    /// Majority-hard-vote class on unscaled features, per row.
    pub hard_vote: Vec<usize>,
    /// Soft-vote class on standardized features, per row.
    pub soft_vote: Vec<usize>,
}

impl ScoredLabels {
    /// Return how many rows the two policies disagree on.
    #[must_use]
    pub fn n_disagreements(&self) -> usize {
        self.hard_vote
            .iter()
            .zip(&self.soft_vote)
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// Scores samples against a forest along the naive and corrected paths.
///
/// The naive path feeds raw features to [`VotePolicy::MajorityHardVote`];
/// the corrected path standardizes them first and uses
/// [`VotePolicy::AverageSoftVote`]. Rows are processed in order and the
/// first failure aborts the run.
pub struct ScoringDriver<'a> {
    forest: &'a Forest,
    scaler: &'a StandardScaler,
}

impl<'a> ScoringDriver<'a> {
    /// Create a driver over a loaded forest and scaler.
    pub fn new(forest: &'a Forest, scaler: &'a StandardScaler) -> Self {
        Self { forest, scaler }
    }

    /// Return both predictions for one sample.
    ///
    /// `row_index` only tags errors.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::RowPrediction`] | either policy failed on this row |
    /// | [`IoError::RowScaling`] | the sample length differs from the scaler's |
    pub fn score_sample(&self, row_index: usize, sample: &[f64]) -> Result<(usize, usize), IoError> {
        let predict = |policy: VotePolicy, sample: &[f64]| {
            self.forest
                .predict(policy, sample)
                .map_err(|source| IoError::RowPrediction {
                    row_index,
                    policy,
                    source,
                })
        };

        let hard = predict(VotePolicy::MajorityHardVote, sample)?;
        let scaled = self
            .scaler
            .transform(sample)
            .map_err(|source| IoError::RowScaling { row_index, source })?;
        let soft = predict(VotePolicy::AverageSoftVote, &scaled)?;
        Ok((hard, soft))
    }

    /// Score every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns the first [`IoError::NonNumericValue`], [`IoError::RowScaling`],
    /// or [`IoError::RowPrediction`] encountered.
    #[instrument(skip_all, fields(n_rows = table.n_rows()))]
    pub fn score(&self, table: &SampleTable) -> Result<ScoredLabels, IoError> {
        let mut labels = ScoredLabels {
            hard_vote: Vec::with_capacity(table.n_rows()),
            soft_vote: Vec::with_capacity(table.n_rows()),
        };

        for row_index in 0..table.n_rows() {
            let sample = table.sample(row_index)?;
            let (hard, soft) = self.score_sample(row_index, &sample)?;
            if hard != soft {
                debug!(row_index, hard, soft, "policies disagree");
            }
            labels.hard_vote.push(hard);
            labels.soft_vote.push(soft);
        }

        info!(
            n_rows = table.n_rows(),
            n_disagreements = labels.n_disagreements(),
            "scoring complete"
        );
        Ok(labels)
    }

    /// Score every row and write the labels into the table's output columns.
    ///
    /// `go_label` and `fixed_go_label` are overwritten when present and
    /// appended otherwise. The table is only modified after every row has
    /// scored successfully.
    ///
    /// # Errors
    ///
    /// Same as [`ScoringDriver::score`].
    pub fn score_into(&self, table: &mut SampleTable) -> Result<ScoredLabels, IoError> {
        let labels = self.score(table)?;
        table.set_column(HARD_VOTE_COLUMN, to_cells(&labels.hard_vote));
        table.set_column(SOFT_VOTE_COLUMN, to_cells(&labels.soft_vote));
        Ok(labels)
    }
}

fn to_cells(labels: &[usize]) -> Vec<String> {
    labels.iter().map(usize::to_string).collect()
}
