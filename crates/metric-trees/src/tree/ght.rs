//! General Hyper-plane Tree: a two-pivot hyperplane split.

use crate::pivot_table::PivotTable;
use crate::selectors::PivotSelector;
use crate::{Distance, Error, Object};

/// A GHT node: either a leaf [`PivotTable`] or an internal node holding two
/// pivots and two children, split by which pivot a point is closer to
/// (ties go left).
pub enum Node {
    /// A leaf, storing a flat pivot-table partition.
    Leaf(PivotTable),
    /// An internal node splitting by nearer-pivot membership.
    Internal {
        /// The first pivot.
        c1: usize,
        /// The second pivot.
        c2: usize,
        /// The subtree of points closer to (or equidistant from) `c1`.
        left: Option<Box<Node>>,
        /// The subtree of points strictly closer to `c2`.
        right: Option<Box<Node>>,
    },
}

/// Bulk-loads a GHT over `data`.
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

    let (pivots, remaining) = selector.select(data, objects, distance, 2)?;
    let (c1, c2) = (pivots[0], pivots[1]);

    let mut left_data = Vec::new();
    let mut right_data = Vec::new();
    for &x in &remaining {
        let d1 = distance.eval(&objects[x], &objects[c1])?;
        let d2 = distance.eval(&objects[x], &objects[c2])?;
        if d1 <= d2 {
            left_data.push(x);
        } else {
            right_data.push(x);
        }
    }

    ftlog::debug!("GHT split {} points between pivots {c1} and {c2}", remaining.len());

    let left = build(&left_data, objects, distance, selector, max_leaf_size, k_leaf)?;
    let right = build(&right_data, objects, distance, selector, max_leaf_size, k_leaf)?;

    Ok(Some(Node::Internal { c1, c2, left: left.map(Box::new), right: right.map(Box::new) }))
}

/// Answers a range query against a GHT rooted at `node`.
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { c1, c2, left, right } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };
    let (c1, c2) = (*c1, *c2);

    let mut hits = Vec::new();
    let mut count = 0;

    let d_qc1 = distance.eval(q, &objects[c1])?;
    let d_qc2 = distance.eval(q, &objects[c2])?;
    count += 2;

    if d_qc1 <= r {
        hits.push(c1);
    }
    if d_qc2 <= r {
        hits.push(c2);
    }

    if d_qc1 - d_qc2 <= 2.0 * r {
        if let Some(left) = left {
            let (left_hits, left_count) = search(left, q, objects, distance, r)?;
            hits.extend(left_hits);
            count += left_count;
        }
    }

    if d_qc2 - d_qc1 <= 2.0 * r {
        if let Some(right) = right {
            let (right_hits, right_count) = search(right, q, objects, distance, r)?;
            hits.extend(right_hits);
            count += right_count;
        }
    }

    Ok((hits, count))
}

/// Parallel counterpart to [`search`]: the two child subtrees are searched
/// concurrently over `rayon`'s global thread pool when both need visiting.
/// Results agree exactly with [`search`].
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn par_search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { c1, c2, left, right } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };
    let (c1, c2) = (*c1, *c2);

    let mut hits = Vec::new();
    let mut count = 0;

    let d_qc1 = distance.eval(q, &objects[c1])?;
    let d_qc2 = distance.eval(q, &objects[c2])?;
    count += 2;

    if d_qc1 <= r {
        hits.push(c1);
    }
    if d_qc2 <= r {
        hits.push(c2);
    }

    let visit_left = d_qc1 - d_qc2 <= 2.0 * r;
    let visit_right = d_qc2 - d_qc1 <= 2.0 * r;

    let (left_result, right_result) = rayon::join(
        || -> Result<(Vec<usize>, usize), Error> {
            if visit_left {
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
        let mut selector = Random::new(13);
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
        let mut selector = Random::new(5);

        let root = build(&data, &objects, &distance, &mut selector, 2, 1).unwrap().unwrap();
        let q = Object::Vector(vec![3.0]);
        let (hits, count) = search(&root, &q, &objects, &distance, 1.0).unwrap();

        let expected: std::collections::HashSet<usize> = data
            .iter()
            .copied()
            .filter(|&i| distance.eval(&objects[i], &q).unwrap() <= 1.0)
            .collect();
        let actual: std::collections::HashSet<usize> = hits.into_iter().collect();
        assert_eq!(actual, expected);
        assert!(count <= data.len());
    }
}
