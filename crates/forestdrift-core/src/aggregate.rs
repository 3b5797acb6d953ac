//! Ensemble aggregation: majority of hard votes and average of soft votes.
//!
//! The two policies disagree whenever trees are confident in different
//! directions. Hard voting throws away each tree's probability mass and
//! breaks count ties by class id, while soft voting (the scikit-learn
//! `predict` semantics) averages the distributions first. Both are kept so
//! the drift between them can be measured.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ForestError;
use crate::forest::Forest;
use crate::proba::ClassProbabilities;

/// How per-tree outputs are combined into one predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VotePolicy {
    /// Each tree votes for its arg-max class; the most-voted class wins,
    /// ties going to the lowest class id.
    MajorityHardVote,
    /// Tree distributions are averaged; the arg-max of the average wins,
    /// ties going to the lowest class id.
    AverageSoftVote,
}

impl VotePolicy {
    /// Return a short, stable name for logs and error context.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            VotePolicy::MajorityHardVote => "majority-hard-vote",
            VotePolicy::AverageSoftVote => "average-soft-vote",
        }
    }
}

impl fmt::Display for VotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hard votes per class, keyed in ascending class-id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    votes: BTreeMap<usize, usize>,
}

impl VoteTally {
    /// Return the class with the most votes.
    ///
    /// The tally is walked in ascending class id and only a strictly larger
    /// count replaces the leader, so a tied count resolves to the lowest
    /// class id. This does not look at probability mass and can therefore
    /// differ from soft voting on the same trees.
    #[must_use]
    pub fn winner(&self) -> usize {
        let mut prediction = 0usize;
        let mut max_votes = 0usize;
        for (&class, &count) in &self.votes {
            if count > max_votes {
                max_votes = count;
                prediction = class;
            }
        }
        prediction
    }

    /// Return the number of trees that voted for `class`.
    #[must_use]
    pub fn votes_for(&self, class: usize) -> usize {
        self.votes.get(&class).copied().unwrap_or(0)
    }

    /// Return the total number of votes cast.
    #[must_use]
    pub fn total(&self) -> usize {
        self.votes.values().sum()
    }

    /// Iterate `(class, votes)` pairs for classes that received a vote.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.votes.iter().map(|(&class, &count)| (class, count))
    }
}

impl Forest {
    /// Predict a class for `sample` under `policy`.
    ///
    /// # Errors
    ///
    /// See [`Forest::predict_hard_vote`] and [`Forest::predict_soft_vote`].
    pub fn predict(&self, policy: VotePolicy, sample: &[f64]) -> Result<usize, ForestError> {
        match policy {
            VotePolicy::MajorityHardVote => self.predict_hard_vote(sample),
            VotePolicy::AverageSoftVote => self.predict_soft_vote(sample),
        }
    }

    /// Collect one hard vote per tree: the arg-max class of its distribution.
    ///
    /// No class-count check is made, since only each tree's arg-max is used.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ForestError::EmptyForest`] | the forest has no trees |
    /// | [`ForestError::Tree`] | a tree failed to evaluate `sample` |
    pub fn vote_tally(&self, sample: &[f64]) -> Result<VoteTally, ForestError> {
        if self.trees.is_empty() {
            return Err(ForestError::EmptyForest);
        }

        let mut votes = BTreeMap::new();
        for (tree_index, tree) in self.trees.iter().enumerate() {
            let proba = tree
                .predict_proba(sample)
                .map_err(|source| ForestError::Tree { tree_index, source })?;
            *votes.entry(proba.argmax()).or_insert(0) += 1;
        }
        Ok(VoteTally { votes })
    }

    /// Predict by majority of hard votes.
    ///
    /// # Errors
    ///
    /// Same as [`Forest::vote_tally`].
    pub fn predict_hard_vote(&self, sample: &[f64]) -> Result<usize, ForestError> {
        Ok(self.vote_tally(sample)?.winner())
    }

    /// Return the ensemble-averaged class distribution for `sample`.
    ///
    /// The expected class count is taken from the first tree's output.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ForestError::EmptyForest`] | the forest has no trees |
    /// | [`ForestError::Tree`] | a tree failed to evaluate `sample` |
    /// | [`ForestError::ClassCountMismatch`] | a tree's distribution length differs from the first tree's |
    pub fn predict_proba(&self, sample: &[f64]) -> Result<ClassProbabilities, ForestError> {
        let mut sum: Option<Vec<f64>> = None;

        for (tree_index, tree) in self.trees.iter().enumerate() {
            let proba = tree
                .predict_proba(sample)
                .map_err(|source| ForestError::Tree { tree_index, source })?;

            match sum.as_mut() {
                None => sum = Some(proba.into_vec()),
                Some(acc) => {
                    if proba.n_classes() != acc.len() {
                        return Err(ForestError::ClassCountMismatch {
                            tree_index,
                            got: proba.n_classes(),
                            expected: acc.len(),
                        });
                    }
                    for (a, p) in acc.iter_mut().zip(proba.as_slice()) {
                        *a += p;
                    }
                }
            }
        }

        let mut avg = sum.ok_or(ForestError::EmptyForest)?;
        let n = self.trees.len() as f64;
        avg.iter_mut().for_each(|v| *v /= n);
        Ok(ClassProbabilities::new(avg))
    }

    /// Predict by the arg-max of the averaged distribution.
    ///
    /// # Errors
    ///
    /// Same as [`Forest::predict_proba`].
    pub fn predict_soft_vote(&self, sample: &[f64]) -> Result<usize, ForestError> {
        Ok(self.predict_proba(sample)?.argmax())
    }
}
