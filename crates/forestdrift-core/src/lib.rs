//! Decision-forest inference for exported scikit-learn ensembles.
//!
//! Converts parallel-array tree records into a tagged-node arena, evaluates
//! trees to normalized class distributions, and aggregates them with either
//! majority hard voting or soft-vote averaging. Also provides the
//! standardization transform applied before the soft-vote path.
//!
//! Pure math library with no file I/O.

pub mod aggregate;
mod error;
mod export;
mod forest;
mod node;
mod proba;
mod scaler;
mod tree;

pub use aggregate::{VotePolicy, VoteTally};
pub use error::{ForestError, ModelError, ScalerError, TreeError};
pub use export::TreeArrays;
pub use forest::Forest;
pub use node::{FeatureIndex, Node, NodeIndex};
pub use proba::ClassProbabilities;
pub use scaler::StandardScaler;
pub use tree::DecisionTree;
