//! Vantage Point Tree: a single-pivot median split.

use crate::pivot_table::PivotTable;
use crate::selectors::PivotSelector;
use crate::{Distance, Error, Object};

/// A VPT node: either a leaf [`PivotTable`] or an internal node holding one
/// pivot, a median split radius, and two children (left = within the
/// median, right = at or beyond it).
pub enum Node {
    /// A leaf, storing a flat pivot-table partition.
    Leaf(PivotTable),
    /// An internal node splitting on a single vantage point.
    Internal {
        /// The node's own pivot (not duplicated into either child).
        pivot: usize,
        /// The median distance from `pivot` to the partitioned data.
        split_radius: f64,
        /// The inner-ball subtree (distances `< split_radius`, ties go right).
        left: Option<Box<Node>>,
        /// The outer-ball subtree (distances `>= split_radius`).
        right: Option<Box<Node>>,
    },
}

/// Bulk-loads a VPT over `data`.
///
/// # Errors
///
/// Propagates an [`Error`] from pivot selection, distance evaluation, or an
/// oversized leaf.
pub fn build(
    data: &[usize],
    objects: &[Object],
    distance: &dyn Distance,
    selector: &mut dyn PivotSelector,
    max_leaf_size: usize,
    k_leaf: usize,
) -> Result<Option<Node>, Error> {
    if data.is_empty() {
        return Ok(None);
    }
    if data.len() <= max_leaf_size {
        return Ok(Some(Node::Leaf(PivotTable::build(data, objects, distance, selector, max_leaf_size, k_leaf)?)));
    }

    let (pivots, remaining) = selector.select(data, objects, distance, 1)?;
    let pivot = pivots[0];

    let mut distances: Vec<(f64, usize)> = remaining
        .iter()
        .map(|&x| distance.eval(&objects[pivot], &objects[x]).map(|d| (d, x)))
        .collect::<Result<Vec<_>, _>>()?;
    distances.sort_by(|a, b| a.0.total_cmp(&b.0));

    let median_idx = distances.len() / 2;
    let split_radius = distances[median_idx].0;
    let left_data: Vec<usize> = distances[..median_idx].iter().map(|&(_, x)| x).collect();
    let right_data: Vec<usize> = distances[median_idx..].iter().map(|&(_, x)| x).collect();

    ftlog::debug!("VPT split {} points at radius {split_radius} (pivot {pivot})", remaining.len());

    let left = build(&left_data, objects, distance, selector, max_leaf_size, k_leaf)?;
    let right = build(&right_data, objects, distance, selector, max_leaf_size, k_leaf)?;

    Ok(Some(Node::Internal { pivot, split_radius, left: left.map(Box::new), right: right.map(Box::new) }))
}

/// Every object reachable from `node`, in DFS order, with no distance cost.
fn all_objects(node: &Node, out: &mut Vec<usize>) {
    match node {
        Node::Leaf(pt) => out.extend(pt.all_objects()),
        Node::Internal { pivot, left, right, .. } => {
            out.push(*pivot);
            if let Some(left) = left {
                all_objects(left, out);
            }
            if let Some(right) = right {
                all_objects(right, out);
            }
        }
    }
}

/// Answers a range query against a VPT rooted at `node`.
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { pivot, split_radius, left, right } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };
    let &pivot = pivot;
    let split_radius = *split_radius;

    let mut hits = Vec::new();
    let mut count = 0;

    let d_qv = distance.eval(q, &objects[pivot])?;
    count += 1;
    if d_qv <= r {
        hits.push(pivot);
    }

    if d_qv + split_radius <= r {
        if let Some(left) = left {
            all_objects(left, &mut hits);
        }
    } else if d_qv <= split_radius + r {
        if let Some(left) = left {
            let (left_hits, left_count) = search(left, q, objects, distance, r)?;
            hits.extend(left_hits);
            count += left_count;
        }
    }

    if d_qv + r > split_radius {
        if let Some(right) = right {
            let (right_hits, right_count) = search(right, q, objects, distance, r)?;
            hits.extend(right_hits);
            count += right_count;
        }
    }

    Ok((hits, count))
}

/// Parallel counterpart to [`search`]: identical pruning logic, but the two
/// child subtrees (when both are visited) are searched concurrently over
/// `rayon`'s global thread pool rather than one after the other. Results
/// agree exactly with [`search`]; only the scheduling differs, per spec.md
/// §5's "MAY parallelize search... across children of an internal node."
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn par_search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { pivot, split_radius, left, right } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };
    let &pivot = pivot;
    let split_radius = *split_radius;

    let mut hits = Vec::new();
    let mut count = 0;

    let d_qv = distance.eval(q, &objects[pivot])?;
    count += 1;
    if d_qv <= r {
        hits.push(pivot);
    }

    let visit_left = d_qv <= split_radius + r;
    let contained_left = d_qv + split_radius <= r;
    let visit_right = d_qv + r > split_radius;

    let (left_result, right_result) = rayon::join(
        || -> Result<(Vec<usize>, usize), Error> {
            if contained_left {
                let mut out = Vec::new();
                if let Some(left) = left {
                    all_objects(left, &mut out);
                }
                Ok((out, 0))
            } else if visit_left {
                if let Some(left) = left {
                    par_search(left, q, objects, distance, r)
                } else {
                    Ok((Vec::new(), 0))
                }
            } else {
                Ok((Vec::new(), 0))
            }
        },
        || -> Result<(Vec<usize>, usize), Error> {
            if visit_right {
                if let Some(right) = right {
                    par_search(right, q, objects, distance, r)
                } else {
                    Ok((Vec::new(), 0))
                }
            } else {
                Ok((Vec::new(), 0))
            }
        },
    );

    let (left_hits, left_count) = left_result?;
    let (right_hits, right_count) = right_result?;
    hits.extend(left_hits);
    hits.extend(right_hits);
    count += left_count + right_count;

    Ok((hits, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Random;
    use distances::vectors::MinkowskiOrder;

    #[test]
    fn par_search_agrees_with_search() {
        let objects: Vec<Object> = (0..40).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let data: Vec<usize> = (0..40).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(9);
        let root = build(&data, &objects, &distance, &mut selector, 3, 1).unwrap().unwrap();

        for r in [0.5, 2.0, 5.0] {
            let q = Object::Vector(vec![17.0]);
            let (mut seq_hits, seq_count) = search(&root, &q, &objects, &distance, r).unwrap();
            let (mut par_hits, par_count) = par_search(&root, &q, &objects, &distance, r).unwrap();
            seq_hits.sort_unstable();
            par_hits.sort_unstable();
            assert_eq!(seq_hits, par_hits);
            assert_eq!(seq_count, par_count);
        }
    }

    #[test]
    fn builds_and_searches_small_tree() {
        let objects: Vec<Object> = (0..20).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let data: Vec<usize> = (0..20).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(11);

        let root = build(&data, &objects, &distance, &mut selector, 2, 1).unwrap().unwrap();
        let q = Object::Vector(vec![10.0]);
        let (hits, count) = search(&root, &q, &objects, &distance, 2.0).unwrap();

        let expected: std::collections::HashSet<usize> = data
            .iter()
            .copied()
            .filter(|&i| distance.eval(&objects[i], &q).unwrap() <= 2.0)
            .collect();
        let actual: std::collections::HashSet<usize> = hits.into_iter().collect();
        assert_eq!(actual, expected);
        assert!(count <= data.len());
    }

    #[test]
    fn empty_data_yields_no_node() {
        let objects: Vec<Object> = Vec::new();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(1);
        let root = build(&[], &objects, &distance, &mut selector, 2, 1).unwrap();
        assert!(root.is_none());
    }
}
