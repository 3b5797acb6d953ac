//! The parallel-array tree record written by the training side.

use serde::{Deserialize, Serialize};

/// One exported tree, in the struct-of-arrays layout used by scikit-learn's
/// `tree_` attribute.
///
/// Node 0 is the root. A node is a leaf iff `children_left[i] == -1`; at a
/// leaf the `children_right`, `feature` and `threshold` entries carry
/// placeholder values and are never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArrays {
    /// Left child index per node, `-1` at leaves.
    pub children_left: Vec<i64>,
    /// Right child index per node, `-1` at leaves.
    pub children_right: Vec<i64>,
    /// Split feature per node.
    pub feature: Vec<i64>,
    /// Split threshold per node.
    pub threshold: Vec<f64>,
    /// Per-class weighted sample counts per node.
    pub value: Vec<Vec<f64>>,
}

impl TreeArrays {
    /// Left-child value marking a leaf node.
    pub const LEAF: i64 = -1;

    /// Return the number of nodes, as given by `children_left`.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }
}
