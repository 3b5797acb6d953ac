//! Arena node type for converted trees.

/// Column of the feature vector a split compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    pub(crate) fn new(column: usize) -> Self {
        Self(column)
    }

    /// Return the column position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position of a node in its tree's arena; the root is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(position: usize) -> Self {
        Self(position)
    }

    /// Return the arena position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in a decision tree arena.
///
/// The exported format marks leaves with a `-1` left child and leaves the
/// remaining fields of that node meaningless. Here the distinction is a
/// variant, so a leaf simply has no split data to misread.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An interior split node.
    Split {
        /// Feature used for the split.
        feature: FeatureIndex,
        /// Threshold value: samples with feature <= threshold go left.
        threshold: f64,
        /// Index of the left child node.
        left: NodeIndex,
        /// Index of the right child node.
        right: NodeIndex,
    },
    /// A terminal leaf node.
    Leaf {
        /// Per-class weighted sample counts, not yet normalized.
        values: Vec<f64>,
    },
}

impl Node {
    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
