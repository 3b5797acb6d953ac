//! Inference regression tests for forestdrift-core.
//!
//! Pins the hard-vote and soft-vote behaviour on hand-built forests and
//! checks the numerical invariants on seeded random forests.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use forestdrift_core::{
    DecisionTree, Forest, ForestError, StandardScaler, TreeArrays, TreeError, VotePolicy,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn leaf(values: Vec<f64>) -> TreeArrays {
    TreeArrays {
        children_left: vec![-1],
        children_right: vec![-1],
        feature: vec![-2],
        threshold: vec![-2.0],
        value: vec![values],
    }
}

/// Root splits feature 0 at 0.5; left leaf [10, 0], right leaf [2, 8].
fn stump() -> TreeArrays {
    TreeArrays {
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![0, -2, -2],
        threshold: vec![0.5, -2.0, -2.0],
        value: vec![vec![12.0, 8.0], vec![10.0, 0.0], vec![2.0, 8.0]],
    }
}

/// Grow a random tree in depth-first pre-order, the layout scikit-learn exports.
fn random_tree(
    rng: &mut ChaCha8Rng,
    max_depth: usize,
    n_features: usize,
    n_classes: usize,
) -> TreeArrays {
    let mut arrays = TreeArrays {
        children_left: Vec::new(),
        children_right: Vec::new(),
        feature: Vec::new(),
        threshold: Vec::new(),
        value: Vec::new(),
    };
    grow(rng, &mut arrays, 0, max_depth, n_features, n_classes);
    arrays
}

fn grow(
    rng: &mut ChaCha8Rng,
    arrays: &mut TreeArrays,
    depth: usize,
    max_depth: usize,
    n_features: usize,
    n_classes: usize,
) -> usize {
    let idx = arrays.children_left.len();
    let mut counts: Vec<f64> = (0..n_classes)
        .map(|_| rng.gen_range(0..10) as f64)
        .collect();
    counts[rng.gen_range(0..n_classes)] += 1.0;

    arrays.children_left.push(-1);
    arrays.children_right.push(-1);
    arrays.feature.push(-2);
    arrays.threshold.push(-2.0);
    arrays.value.push(counts);

    if depth < max_depth && rng.gen_bool(0.8) {
        arrays.feature[idx] = rng.gen_range(0..n_features) as i64;
        arrays.threshold[idx] = rng.r#gen::<f64>() * 2.0 - 1.0;
        let left = grow(rng, arrays, depth + 1, max_depth, n_features, n_classes);
        let right = grow(rng, arrays, depth + 1, max_depth, n_features, n_classes);
        arrays.children_left[idx] = left as i64;
        arrays.children_right[idx] = right as i64;
    }
    idx
}

fn random_records(seed: u64, n_trees: usize) -> Vec<TreeArrays> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_trees)
        .map(|_| random_tree(&mut rng, 4, 4, 3))
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_stump_both_policies_agree() {
    let forest = Forest::from_arrays(&[stump()]).unwrap();

    let left = forest.predict_proba(&[0.2]).unwrap();
    assert_eq!(left.as_slice(), &[1.0, 0.0]);
    assert_eq!(forest.predict(VotePolicy::MajorityHardVote, &[0.2]).unwrap(), 0);
    assert_eq!(forest.predict(VotePolicy::AverageSoftVote, &[0.2]).unwrap(), 0);

    let right = forest.predict_proba(&[0.9]).unwrap();
    assert_abs_diff_eq!(right.as_slice()[0], 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(right.as_slice()[1], 0.8, epsilon = 1e-12);
    assert_eq!(forest.predict(VotePolicy::MajorityHardVote, &[0.9]).unwrap(), 1);
    assert_eq!(forest.predict(VotePolicy::AverageSoftVote, &[0.9]).unwrap(), 1);
}

#[test]
fn disagreeing_pair_ties_resolve_to_class_zero() {
    let forest = Forest::from_arrays(&[leaf(vec![0.9, 0.1]), leaf(vec![0.1, 0.9])]).unwrap();

    let tally = forest.vote_tally(&[]).unwrap();
    assert_eq!(tally.votes_for(0), 1);
    assert_eq!(tally.votes_for(1), 1);
    assert_eq!(forest.predict_hard_vote(&[]).unwrap(), 0);

    let avg = forest.predict_proba(&[]).unwrap();
    assert_abs_diff_eq!(avg.as_slice()[0], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(avg.as_slice()[1], 0.5, epsilon = 1e-12);
    assert_eq!(forest.predict_soft_vote(&[]).unwrap(), 0);
}

#[test]
fn hard_vote_tie_break_depends_on_class_id_not_tree_order() {
    let forward = Forest::from_arrays(&[leaf(vec![0.1, 0.9]), leaf(vec![0.9, 0.1])]).unwrap();
    assert_eq!(forward.predict_hard_vote(&[]).unwrap(), 0);
}

#[test]
fn short_sample_reports_feature_and_length() {
    let mut arrays = stump();
    arrays.feature[0] = 4;
    let forest = Forest::from_arrays(&[leaf(vec![1.0, 0.0]), arrays]).unwrap();

    let err = forest.predict_soft_vote(&[0.1, 0.2, 0.3]).unwrap_err();
    assert_eq!(
        err,
        ForestError::Tree {
            tree_index: 1,
            source: TreeError::OutOfRange {
                feature_index: 4,
                sample_len: 3
            }
        }
    );
    assert!(err.to_string().contains("tree 1"));
}

#[test]
fn seeded_forest_is_deterministic() {
    let a = Forest::from_arrays(&random_records(7, 25)).unwrap();
    let b = Forest::from_arrays(&random_records(7, 25)).unwrap();
    let sample = [0.1, -0.3, 0.7, 0.0];
    assert_eq!(a, b);
    assert_eq!(
        a.predict_hard_vote(&sample).unwrap(),
        b.predict_hard_vote(&sample).unwrap()
    );
    assert_eq!(
        a.predict_proba(&sample).unwrap(),
        b.predict_proba(&sample).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_sample() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1.5f64..1.5, 4)
}

proptest! {
    #[test]
    fn tree_output_is_a_distribution(seed in any::<u64>(), sample in arb_sample()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let tree = DecisionTree::from_arrays(&random_tree(&mut rng, 5, 4, 3), 0).unwrap();
        let proba = tree.predict_proba(&sample).unwrap();
        prop_assert!(proba.as_slice().iter().all(|&p| p >= 0.0));
        let sum: f64 = proba.as_slice().iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn soft_vote_ignores_tree_order(
        seed in any::<u64>(),
        n_trees in 1usize..12,
        rotate in 0usize..12,
        sample in arb_sample(),
    ) {
        let records = random_records(seed, n_trees);
        let mut shuffled = records.clone();
        shuffled.reverse();
        shuffled.rotate_left(rotate % n_trees);

        let original = Forest::from_arrays(&records).unwrap().predict_proba(&sample).unwrap();
        let reordered = Forest::from_arrays(&shuffled).unwrap().predict_proba(&sample).unwrap();

        for (a, b) in original.as_slice().iter().zip(reordered.as_slice()) {
            prop_assert!((a - b).abs() < 1e-12);
        }

        // Summation order may perturb the last bits; the winner only has to
        // match when it is not a numerical tie.
        let mut sorted = original.as_slice().to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        if sorted[0] - sorted[1] > 1e-9 {
            prop_assert_eq!(original.argmax(), reordered.argmax());
        }
    }

    #[test]
    fn scaling_round_trips(
        params in proptest::collection::vec((-100.0f64..100.0, 0.01f64..50.0, -1e3f64..1e3), 1..16),
    ) {
        let mean: Vec<f64> = params.iter().map(|p| p.0).collect();
        let scale: Vec<f64> = params.iter().map(|p| p.1).collect();
        let sample: Vec<f64> = params.iter().map(|p| p.2).collect();

        let scaler = StandardScaler::new(mean.clone(), scale.clone()).unwrap();
        let scaled = scaler.transform(&sample).unwrap();
        for i in 0..sample.len() {
            let restored = scaled[i] * scale[i] + mean[i];
            prop_assert!((restored - sample[i]).abs() <= 1e-9 * (1.0 + sample[i].abs()));
        }
    }
}
