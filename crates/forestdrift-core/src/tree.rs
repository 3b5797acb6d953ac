use std::collections::VecDeque;

use crate::{
    error::{ModelError, TreeError},
    export::TreeArrays,
    node::{FeatureIndex, Node, NodeIndex},
    proba::ClassProbabilities,
};

/// A decision tree stored as a `Vec<Node>` arena with the root at index 0.
///
/// Build one from an exported record with [`DecisionTree::from_arrays`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

impl DecisionTree {
    /// Convert an exported parallel-array record into an arena tree.
    ///
    /// `tree_index` is the record's position in the model artifact and only
    /// tags errors.
    ///
    /// Leaf value sums are not checked here: a leaf whose values sum to zero
    /// is reported as [`TreeError::InvalidLeaf`] when a sample reaches it.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ModelError::EmptyTree`] | `children_left` is empty |
    /// | [`ModelError::ArrayLengthMismatch`] | another array's length differs from `children_left` |
    /// | [`ModelError::ValueLengthMismatch`] | a node's value vector length differs from the root's |
    /// | [`ModelError::InvalidLeafValue`] | a leaf value is negative or non-finite |
    /// | [`ModelError::InvalidChild`] | a child index is out of bounds or not greater than its parent's (nodes must be stored parent-before-child) |
    /// | [`ModelError::InvalidFeature`] | a split's feature index is negative |
    pub fn from_arrays(arrays: &TreeArrays, tree_index: usize) -> Result<Self, ModelError> {
        let n_nodes = arrays.n_nodes();
        if n_nodes == 0 {
            return Err(ModelError::EmptyTree { tree_index });
        }

        let lengths = [
            ("children_right", arrays.children_right.len()),
            ("feature", arrays.feature.len()),
            ("threshold", arrays.threshold.len()),
            ("value", arrays.value.len()),
        ];
        for (field, got) in lengths {
            if got != n_nodes {
                return Err(ModelError::ArrayLengthMismatch {
                    tree_index,
                    field,
                    got,
                    expected: n_nodes,
                });
            }
        }

        let n_classes = arrays.value[0].len();
        let mut nodes = Vec::with_capacity(n_nodes);

        for node in 0..n_nodes {
            let values = &arrays.value[node];
            if values.len() != n_classes {
                return Err(ModelError::ValueLengthMismatch {
                    tree_index,
                    node,
                    got: values.len(),
                    expected: n_classes,
                });
            }

            let left = arrays.children_left[node];
            if left == TreeArrays::LEAF {
                if let Some(&value) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                    return Err(ModelError::InvalidLeafValue {
                        tree_index,
                        node,
                        value,
                    });
                }
                nodes.push(Node::Leaf {
                    values: values.clone(),
                });
                continue;
            }

            // Children must come after their parent, which rules out cycles.
            let child_index = |child: i64| -> Result<NodeIndex, ModelError> {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(ModelError::InvalidChild {
                        tree_index,
                        node,
                        child,
                        n_nodes,
                    });
                }
                Ok(NodeIndex::new(child as usize))
            };
            let left = child_index(left)?;
            let right = child_index(arrays.children_right[node])?;

            let feature = arrays.feature[node];
            if feature < 0 {
                return Err(ModelError::InvalidFeature {
                    tree_index,
                    node,
                    feature,
                });
            }

            nodes.push(Node::Split {
                feature: FeatureIndex::new(feature as usize),
                threshold: arrays.threshold[node],
                left,
                right,
            });
        }

        Ok(Self { nodes, n_classes })
    }

    /// Return the normalized class probability distribution at the leaf
    /// reached by `sample`.
    ///
    /// Traverses from the root: at each `Split`, goes left when
    /// `sample[feature] <= threshold`, right otherwise.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::OutOfRange`] | a visited split's feature index is `>= sample.len()` |
    /// | [`TreeError::InvalidLeaf`] | the reached leaf's values sum to zero |
    pub fn predict_proba(&self, sample: &[f64]) -> Result<ClassProbabilities, TreeError> {
        let (node, values) = self.traverse(sample)?;
        let total: f64 = values.iter().sum();
        if total == 0.0 {
            return Err(TreeError::InvalidLeaf { node });
        }
        Ok(ClassProbabilities::new(
            values.iter().map(|v| v / total).collect(),
        ))
    }

    /// Return the arena index of the leaf reached by `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OutOfRange`] when a visited split's feature index
    /// is `>= sample.len()`.
    pub fn leaf_index(&self, sample: &[f64]) -> Result<NodeIndex, TreeError> {
        self.traverse(sample).map(|(node, _)| NodeIndex::new(node))
    }

    /// Return the length of every value vector in this tree.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the total number of nodes in the tree (both splits and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut queue = VecDeque::new();
        queue.push_back((0usize, 0usize));

        while let Some((node_idx, d)) = queue.pop_front() {
            match &self.nodes[node_idx] {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Split { left, right, .. } => {
                    queue.push_back((left.index(), d + 1));
                    queue.push_back((right.index(), d + 1));
                }
            }
        }

        max_depth
    }

    /// Return the node arena.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Walk from the root to a leaf and return its index and raw values.
    fn traverse(&self, sample: &[f64]) -> Result<(usize, &[f64]), TreeError> {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { values } => return Ok((idx, values.as_slice())),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = sample.get(feature.index()).ok_or(TreeError::OutOfRange {
                        feature_index: feature.index(),
                        sample_len: sample.len(),
                    })?;
                    // Ties go left.
                    idx = if *value <= *threshold {
                        left.index()
                    } else {
                        right.index()
                    };
                }
            }
        }
    }
}
