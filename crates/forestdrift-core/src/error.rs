//! Error types for tree evaluation, forest aggregation, scaling, and model import.

/// Errors from evaluating a single decision tree on one sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// Returned when a visited split references a feature the sample does not have.
    ///
    /// Signals that the model was trained on more feature columns than the
    /// input row carries.
    #[error("feature index {feature_index} out of range (sample length: {sample_len})")]
    OutOfRange {
        /// Feature index referenced by the split.
        feature_index: usize,
        /// Number of values in the sample.
        sample_len: usize,
    },

    /// Returned when the reached leaf's value vector sums to zero.
    #[error("leaf node {node} has no samples (value vector sums to zero)")]
    InvalidLeaf {
        /// Arena index of the offending leaf.
        node: usize,
    },
}

/// Errors from combining per-tree outputs across the ensemble.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForestError {
    /// Returned when the forest contains no trees.
    #[error("empty forest")]
    EmptyForest,

    /// Returned when a tree's probability vector length differs from tree 0's.
    #[error("tree {tree_index} has {got} classes, expected {expected}")]
    ClassCountMismatch {
        /// Position of the offending tree in the forest.
        tree_index: usize,
        /// Class count produced by the offending tree.
        got: usize,
        /// Class count produced by the first tree.
        expected: usize,
    },

    /// Wraps an evaluation error, tagged with the tree that produced it.
    #[error("error in tree {tree_index}")]
    Tree {
        /// Position of the offending tree in the forest.
        tree_index: usize,
        /// The underlying evaluation error.
        source: TreeError,
    },
}

/// Errors from constructing or applying a [`StandardScaler`](crate::StandardScaler).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalerError {
    /// Returned when `mean` and `scale` have different lengths.
    #[error("scaler has {mean_len} means but {scale_len} scales")]
    ParameterLengthMismatch {
        /// Length of the `mean` vector.
        mean_len: usize,
        /// Length of the `scale` vector.
        scale_len: usize,
    },

    /// Returned when a `scale` entry is zero, NaN, or infinite.
    #[error("scale for feature {feature_index} is {value}, must be finite and non-zero")]
    InvalidScale {
        /// Feature column of the offending entry.
        feature_index: usize,
        /// The rejected scale value.
        value: f64,
    },

    /// Returned when a sample's length differs from the scaler's feature count.
    #[error("sample has {got} features, scaler expects {expected}")]
    LengthMismatch {
        /// Number of features the scaler was fitted on.
        expected: usize,
        /// Number of values in the sample.
        got: usize,
    },
}

/// Errors from converting an exported parallel-array tree into a [`DecisionTree`](crate::DecisionTree).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Returned when a tree record has zero nodes.
    #[error("tree {tree_index} has no nodes")]
    EmptyTree {
        /// Position of the tree in the model artifact.
        tree_index: usize,
    },

    /// Returned when one of the parallel arrays differs in length from `children_left`.
    #[error("tree {tree_index}: array `{field}` has {got} entries, expected {expected}")]
    ArrayLengthMismatch {
        /// Position of the tree in the model artifact.
        tree_index: usize,
        /// Name of the offending array.
        field: &'static str,
        /// Length of the offending array.
        got: usize,
        /// Length of `children_left`.
        expected: usize,
    },

    /// Returned when a split's child index is out of bounds or not greater
    /// than the split's own index.
    ///
    /// Nodes must be stored parent-before-child, the depth-first layout
    /// scikit-learn exports. A tree that is otherwise well formed but lists
    /// a child ahead of its parent is rejected here.
    #[error("tree {tree_index}: node {node} references child {child} but tree has {n_nodes} nodes")]
    InvalidChild {
        /// Position of the tree in the model artifact.
        tree_index: usize,
        /// Index of the split node.
        node: usize,
        /// The rejected child index.
        child: i64,
        /// Number of nodes in the tree.
        n_nodes: usize,
    },

    /// Returned when a split's feature index is negative.
    #[error("tree {tree_index}: split node {node} has invalid feature index {feature}")]
    InvalidFeature {
        /// Position of the tree in the model artifact.
        tree_index: usize,
        /// Index of the split node.
        node: usize,
        /// The rejected feature index.
        feature: i64,
    },

    /// Returned when a node's value vector length differs from the root's.
    #[error("tree {tree_index}: node {node} has {got} class values, expected {expected}")]
    ValueLengthMismatch {
        /// Position of the tree in the model artifact.
        tree_index: usize,
        /// Index of the offending node.
        node: usize,
        /// Length of the offending value vector.
        got: usize,
        /// Length of the root's value vector.
        expected: usize,
    },

    /// Returned when a leaf's value vector contains a negative or non-finite entry.
    #[error("tree {tree_index}: leaf {node} has invalid class value {value}")]
    InvalidLeafValue {
        /// Position of the tree in the model artifact.
        tree_index: usize,
        /// Index of the offending leaf.
        node: usize,
        /// The rejected value.
        value: f64,
    },
}
