//! Multiple Vantage Point Tree: an equi-depth split under several pivots at
//! once, with per-pivot distance bounds on each child.

use super::equi_depth_partition;
use crate::pivot_table::PivotTable;
use crate::selectors::PivotSelector;
use crate::{Distance, Error, Object};

/// An MVPT node: either a leaf [`PivotTable`] or an internal node holding
/// `n_internal` pivots, `regions ^ n_internal` children, and per-child
/// `lower`/`upper` distance bounds to each pivot.
pub enum Node {
    /// A leaf, storing a flat pivot-table partition.
    Leaf(PivotTable),
    /// An internal node splitting by equi-depth regions under several
    /// pivots in sequence.
    Internal {
        /// The node's own pivots (removed from the partitioned data).
        pivots: Vec<usize>,
        /// The children, one per equi-depth region; `None` for an empty
        /// partition.
        children: Vec<Option<Box<Node>>>,
        /// `lower[i][j]`: the minimum distance from `pivots[i]` to any point
        /// under `children[j]`.
        lower: Vec<Vec<f64>>,
        /// `upper[i][j]`: the maximum distance from `pivots[i]` to any point
        /// under `children[j]`.
        upper: Vec<Vec<f64>>,
    },
}

/// Bulk-loads an MVPT over `data`.
///
/// - `regions`: the number of equi-depth regions each pivot subdivides a
///   partition into.
/// - `n_internal`: the number of pivots selected at this internal node.
///
/// # Errors
///
/// Propagates an [`Error`] from pivot selection, distance evaluation, or an
/// oversized leaf.
#[allow(clippy::too_many_arguments)]
pub fn build(
    data: &[usize],
    objects: &[Object],
    distance: &dyn Distance,
    selector: &mut dyn PivotSelector,
    max_leaf_size: usize,
    k_leaf: usize,
    regions: usize,
    n_internal: usize,
) -> Result<Option<Node>, Error> {
    if data.is_empty() {
        return Ok(None);
    }
    if data.len() <= max_leaf_size || data.len() < n_internal {
        return Ok(Some(Node::Leaf(PivotTable::build(data, objects, distance, selector, max_leaf_size, k_leaf)?)));
    }

    let (pivots, remaining) = selector.select(data, objects, distance, n_internal)?;

    let mut partitions: Vec<Vec<usize>> = vec![remaining];
    for &pivot in &pivots {
        let mut next = Vec::new();
        for partition in partitions {
            if partition.is_empty() {
                continue;
            }
            let keyed = partition
                .iter()
                .map(|&x| distance.eval(&objects[pivot], &objects[x]).map(|d| (x, d)))
                .collect::<Result<Vec<_>, _>>()?;
            next.extend(equi_depth_partition(keyed, regions));
        }
        partitions = next;
    }

    let mut lower = vec![vec![f64::NEG_INFINITY; partitions.len()]; pivots.len()];
    let mut upper = vec![vec![f64::INFINITY; partitions.len()]; pivots.len()];
    let mut children = Vec::with_capacity(partitions.len());

    ftlog::debug!("MVPT split into {} partitions under {} pivots", partitions.len(), pivots.len());

    for (j, partition) in partitions.iter().enumerate() {
        if !partition.is_empty() {
            for (i, &pivot) in pivots.iter().enumerate() {
                let dists = partition
                    .iter()
                    .map(|&x| distance.eval(&objects[pivot], &objects[x]))
                    .collect::<Result<Vec<_>, _>>()?;
                lower[i][j] = dists.iter().copied().fold(f64::INFINITY, f64::min);
                upper[i][j] = dists.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            }
        }
        let child = build(partition, objects, distance, selector, max_leaf_size, k_leaf, regions, n_internal)?;
        children.push(child.map(Box::new));
    }

    Ok(Some(Node::Internal { pivots, children, lower, upper }))
}

/// Every object reachable from `node`, in DFS order, with no distance cost.
fn all_objects(node: &Node, out: &mut Vec<usize>) {
    match node {
        Node::Leaf(pt) => out.extend(pt.all_objects()),
        Node::Internal { pivots, children, .. } => {
            out.extend(pivots.iter().copied());
            for child in children.iter().flatten() {
                all_objects(child, out);
            }
        }
    }
}

/// Answers a range query against an MVPT rooted at `node`.
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { pivots, children, lower, upper } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };

    let mut hits = Vec::new();
    let mut count = 0;

    let mut d_qp = Vec::with_capacity(pivots.len());
    for &pivot in pivots {
        let d = distance.eval(q, &objects[pivot])?;
        count += 1;
        d_qp.push(d);
        if d <= r {
            hits.push(pivot);
        }
    }

    for (j, child) in children.iter().enumerate() {
        let Some(child) = child else { continue };

        let contained = (0..pivots.len()).any(|i| d_qp[i] + upper[i][j] <= r);
        if contained {
            all_objects(child, &mut hits);
            continue;
        }

        let pruned = (0..pivots.len()).any(|i| d_qp[i] + r < lower[i][j] || d_qp[i] - r > upper[i][j]);
        if pruned {
            continue;
        }

        let (child_hits, child_count) = search(child, q, objects, distance, r)?;
        hits.extend(child_hits);
        count += child_count;
    }

    Ok((hits, count))
}

/// Parallel counterpart to [`search`]: once containment/pruning has
/// filtered the children, the remaining recursive visits run concurrently
/// over `rayon`'s global thread pool. Results agree exactly with [`search`].
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn par_search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
    let Node::Internal { pivots, children, lower, upper } = node else {
        let Node::Leaf(pt) = node else { unreachable!() };
        return pt.search(q, objects, distance, r);
    };

    let mut hits = Vec::new();
    let mut count = 0;

    let mut d_qp = Vec::with_capacity(pivots.len());
    for &pivot in pivots {
        let d = distance.eval(q, &objects[pivot])?;
        count += 1;
        d_qp.push(d);
        if d <= r {
            hits.push(pivot);
        }
    }

    let mut to_recurse = Vec::new();
    for (j, child) in children.iter().enumerate() {
        let Some(child) = child else { continue };

        let contained = (0..pivots.len()).any(|i| d_qp[i] + upper[i][j] <= r);
        if contained {
            all_objects(child, &mut hits);
            continue;
        }

        let pruned = (0..pivots.len()).any(|i| d_qp[i] + r < lower[i][j] || d_qp[i] - r > upper[i][j]);
        if pruned {
            continue;
        }

        to_recurse.push(child.as_ref());
    }

    let results: Vec<Result<(Vec<usize>, usize), Error>> = rayon::prelude::ParallelIterator::collect(
        rayon::iter::IntoParallelRefIterator::par_iter(&to_recurse).map(|child| par_search(child, q, objects, distance, r)),
    );
    for result in results {
        let (child_hits, child_count) = result?;
        hits.extend(child_hits);
        count += child_count;
    }

    Ok((hits, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Random;
    use distances::vectors::MinkowskiOrder;

    #[test]
    fn par_search_agrees_with_search() {
        let objects: Vec<Object> = (0..60).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let data: Vec<usize> = (0..60).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(21);
        let root = build(&data, &objects, &distance, &mut selector, 4, 1, 2, 2).unwrap().unwrap();

        for r in [1.0, 3.0, 8.0] {
            let q = Object::Vector(vec![25.0]);
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
        let objects: Vec<Object> = (0..30).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let data: Vec<usize> = (0..30).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(9);

        let root = build(&data, &objects, &distance, &mut selector, 2, 1, 2, 2).unwrap().unwrap();
        let q = Object::Vector(vec![15.0]);
        let (hits, count) = search(&root, &q, &objects, &distance, 3.0).unwrap();

        let expected: std::collections::HashSet<usize> = data
            .iter()
            .copied()
            .filter(|&i| distance.eval(&objects[i], &q).unwrap() <= 3.0)
            .collect();
        let actual: std::collections::HashSet<usize> = hits.into_iter().collect();
        assert_eq!(actual, expected);
        assert!(count <= data.len());
    }
}
