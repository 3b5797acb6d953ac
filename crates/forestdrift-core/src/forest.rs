//! An ensemble of imported decision trees.

use tracing::{debug, instrument};

use crate::error::ModelError;
use crate::export::TreeArrays;
use crate::tree::DecisionTree;

/// An ordered ensemble of decision trees.
///
/// Construction accepts any list of trees. An empty forest or trees with
/// differing class counts are reported by the aggregation methods in
/// [`aggregate`](crate::aggregate), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    pub(crate) trees: Vec<DecisionTree>,
}

impl Forest {
    /// Create a forest from already converted trees.
    #[must_use]
    pub fn new(trees: Vec<DecisionTree>) -> Self {
        Self { trees }
    }

    /// Convert every exported tree record, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] raised by
    /// [`DecisionTree::from_arrays`], tagged with the record's position.
    #[instrument(skip_all, fields(n_records = records.len()))]
    pub fn from_arrays(records: &[TreeArrays]) -> Result<Self, ModelError> {
        let trees = records
            .iter()
            .enumerate()
            .map(|(tree_index, arrays)| DecisionTree::from_arrays(arrays, tree_index))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_trees = trees.len(),
            n_nodes = trees.iter().map(DecisionTree::n_nodes).sum::<usize>(),
            "forest converted"
        );

        Ok(Self { trees })
    }

    /// Return the trees in ensemble order.
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Return the number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the class count of the first tree, or `None` for an empty forest.
    #[must_use]
    pub fn n_classes(&self) -> Option<usize> {
        self.trees.first().map(DecisionTree::n_classes)
    }

    /// Return `true` if every tree has the same class count.
    #[must_use]
    pub fn has_uniform_classes(&self) -> bool {
        self.trees
            .windows(2)
            .all(|pair| pair[0].n_classes() == pair[1].n_classes())
    }
}
