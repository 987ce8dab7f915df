//! End-to-end range-search scenarios and cross-structure invariants.
//!
//! Each scenario is run through all five index families at `max_leaf_size =
//! 2`, and the resulting hit multiset is checked for cross-agreement.

use distances::vectors::MinkowskiOrder;
use metric_trees::selectors::Random;
use metric_trees::tree::lpt;
use metric_trees::{Distance, Edit, Index, Minkowski, Object};
use test_case::test_case;

fn vectors(rows: &[[f64; 2]]) -> Vec<Object> {
    rows.iter().map(|r| Object::Vector(r.to_vec())).collect()
}

fn texts(rows: &[&str]) -> Vec<Object> {
    rows.iter().map(|s| Object::Text((*s).to_string())).collect()
}

/// Builds all five index families over the same dataset and distance, and
/// asserts every one returns the same hit multiset (sorted by dataset index)
/// for `(q, r)`, matching the expected set.
fn assert_cross_agreement(objects: &[Object], distance: &dyn Distance, q: &Object, r: f64, mut expected: Vec<usize>) {
    let data: Vec<usize> = (0..objects.len()).collect();
    expected.sort_unstable();

    // The flat Pivot Table has no recursive split: its one leaf holds every
    // non-pivot object, so it needs a max_leaf_size sized to the whole
    // dataset rather than the per-leaf budget the recursive trees use.
    let pt = Index::build_pivot_table(&data, objects, distance, &mut Random::new(7), objects.len(), 2).unwrap();
    let vpt = Index::build_vpt(&data, objects, distance, &mut Random::new(7), 2, 1).unwrap();
    let ght = Index::build_ght(&data, objects, distance, &mut Random::new(7), 2, 1).unwrap();
    let mvpt = Index::build_mvpt(&data, objects, distance, &mut Random::new(7), 2, 1, 2, 2).unwrap();
    let projection = lpt::Projection { matrix: vec![vec![1, -1], vec![1, 1]], regions: 2 };
    let lpt = Index::build_lpt(&data, objects, distance, &mut Random::new(7), 2, 1, projection).unwrap();

    for index in [&pt, &vpt, &ght, &mvpt, &lpt] {
        let (mut hits, count) = index.search(q, objects, distance, r).unwrap();
        hits.sort_unstable();
        assert_eq!(hits, expected, "{} disagreed on hits", index.name());
        assert!(count <= objects.len(), "{} used more than a linear number of distance calls", index.name());
    }
}

#[test_case([0.0, 0.0], 1.0, vec![0, 1, 2]; "S1: small radius around origin")]
#[test_case([0.0, 0.0], 1.414_213_6, vec![0, 1, 2, 3]; "S2: diagonal radius includes the corner")]
fn s1_s2_square_with_outlier(q: [f64; 2], r: f64, expected: Vec<usize>) {
    let objects = vectors(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [5.0, 5.0]]);
    let distance = Minkowski { order: MinkowskiOrder::Euclidean };
    assert_cross_agreement(&objects, &distance, &Object::Vector(q.to_vec()), r, expected);
}

#[test]
fn s3_zero_radius_hits_only_the_outlier() {
    let objects = vectors(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [5.0, 5.0]]);
    let distance = Minkowski { order: MinkowskiOrder::Euclidean };
    assert_cross_agreement(&objects, &distance, &Object::Vector(vec![5.0, 5.0]), 0.0, vec![4]);
}

#[test]
fn s4_edit_distance_small_radius() {
    let objects = texts(&["cat", "bat", "cut", "dog"]);
    let distance = Edit;
    assert_cross_agreement(&objects, &distance, &Object::Text("cat".to_string()), 1.0, vec![0, 1, 2]);
}

#[test]
fn s5_edit_distance_wide_radius_covers_everything() {
    let objects = texts(&["cat", "bat", "cut", "dog"]);
    let distance = Edit;
    assert_cross_agreement(&objects, &distance, &Object::Text("dog".to_string()), 3.0, vec![0, 1, 2, 3]);
}

#[test]
fn s6_one_dimensional_manhattan_range() {
    let objects: Vec<Object> = (0..10).map(|v| Object::Vector(vec![f64::from(v)])).collect();
    let distance = Minkowski { order: MinkowskiOrder::Manhattan };
    assert_cross_agreement(&objects, &distance, &Object::Vector(vec![4.5]), 1.5, vec![3, 4, 5, 6]);
}

#[test]
fn soundness_and_completeness_hold_against_a_linear_scan() {
    let objects: Vec<Object> = (0..50).map(|v| Object::Vector(vec![f64::from(v % 7), f64::from(v % 5)])).collect();
    let data: Vec<usize> = (0..objects.len()).collect();
    let distance = Minkowski { order: MinkowskiOrder::Euclidean };
    let q = Object::Vector(vec![3.0, 2.0]);

    for r in [0.0, 1.0, 2.5, 4.0] {
        let mut expected: Vec<usize> = data.iter().copied().filter(|&i| distance.eval(&objects[i], &q).unwrap() <= r).collect();
        expected.sort_unstable();

        let vpt = Index::build_vpt(&data, &objects, &distance, &mut Random::new(3), 4, 1).unwrap();
        let (mut hits, count) = vpt.search(&q, &objects, &distance, r).unwrap();
        hits.sort_unstable();
        assert_eq!(hits, expected, "radius {r}");
        assert!(count <= objects.len());
    }
}

/// A VPT built over a large, spread-out dataset should prune: a selective
/// query should need strictly fewer than a linear number of distance calls.
/// This is a smoke test for "some pruning occurred", not a performance
/// guarantee.
#[test]
fn vpt_prunes_on_a_large_spread_out_dataset() {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1_u64 << 53) as f64
    };

    let n = 2_000;
    let objects: Vec<Object> = (0..n).map(|_| Object::Vector(vec![next() * 1000.0, next() * 1000.0])).collect();
    let data: Vec<usize> = (0..n).collect();
    let distance = Minkowski { order: MinkowskiOrder::Euclidean };
    let vpt = Index::build_vpt(&data, &objects, &distance, &mut Random::new(11), 20, 1).unwrap();

    let q = Object::Vector(vec![500.0, 500.0]);
    let (_, count) = vpt.search(&q, &objects, &distance, 10.0).unwrap();
    assert!(count < objects.len(), "expected pruning to avoid a linear scan, got {count} calls over {n} objects");
}
