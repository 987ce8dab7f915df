//! Linear Partition Tree: MVPT generalized to equi-depth splits under
//! integer-weighted projections of pivot distances.

use super::equi_depth_partition;
use crate::pivot_table::PivotTable;
use crate::selectors::PivotSelector;
use crate::{Distance, Error, Object};

/// An LPT node: either a leaf [`PivotTable`] or an internal node holding `n`
/// pivots, `regions ^ k` children (`k` = number of projection rows), and
/// per-child `lower`/`upper` bounds on each row's projection.
pub enum Node {
    /// A leaf, storing a flat pivot-table partition.
    Leaf(PivotTable),
    /// An internal node splitting by equi-depth regions under a sequence of
    /// integer-weighted projections of pivot distances.
    Internal {
        /// The node's own pivots (removed from the partitioned data).
        pivots: Vec<usize>,
        /// The children, one per equi-depth region; `None` for an empty
        /// partition.
        children: Vec<Option<Box<Node>>>,
        /// `lower[i][j]`: the minimum value of `phi_i(x) = sum_l A[i][l] *
        /// d(x, pivots[l])` over the points under `children[j]`.
        lower: Vec<Vec<f64>>,
        /// `upper[i][j]`: the maximum value of `phi_i` over the points
        /// under `children[j]`.
        upper: Vec<Vec<f64>>,
    },
}

/// The fixed integer projection matrix and per-row equi-depth region count
/// that parameterize an LPT. `matrix` has shape `k x n`: `k` rows (one per
/// projection / split round) and `n` columns (one per pivot).
#[derive(Debug, Clone)]
pub struct Projection {
    /// The `k x n` integer projection matrix.
    pub matrix: Vec<Vec<i64>>,
    /// The number of equi-depth regions each projection row splits a
    /// partition into.
    pub regions: usize,
}

impl Projection {
    /// The number of projection rows (`k`), i.e. the number of split rounds.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.matrix.len()
    }

    /// The number of pivots this projection needs (`n`), the width of each
    /// row.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }
}

/// Computes `phi(x) = sum_l row[l] * d(x, pivots[l])`, skipping pivots whose
/// coefficient is `0`.
#[allow(clippy::cast_precision_loss)]
fn project(row: &[i64], pivots: &[usize], x: usize, objects: &[Object], distance: &dyn Distance) -> Result<f64, Error> {
    let mut value = 0.0;
    for (&coeff, &pivot) in row.iter().zip(pivots) {
        if coeff != 0 {
            let d = distance.eval(&objects[x], &objects[pivot])?;
            value += coeff as f64 * d;
        }
    }
    Ok(value)
}

/// Bulk-loads an LPT over `data`.
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
    projection: &Projection,
) -> Result<Option<Node>, Error> {
    if data.is_empty() {
        return Ok(None);
    }
    let n = projection.cols();
    if data.len() <= max_leaf_size || data.len() < n {
        return Ok(Some(Node::Leaf(PivotTable::build(data, objects, distance, selector, max_leaf_size, k_leaf)?)));
    }

    let (pivots, remaining) = selector.select(data, objects, distance, n)?;

    let mut partitions: Vec<Vec<usize>> = vec![remaining];
    for row in &projection.matrix {
        let mut next = Vec::new();
        for partition in partitions {
            if partition.is_empty() {
                continue;
            }
            let keyed = partition
                .iter()
                .map(|&x| project(row, &pivots, x, objects, distance).map(|v| (x, v)))
                .collect::<Result<Vec<_>, _>>()?;
            next.extend(equi_depth_partition(keyed, projection.regions));
        }
        partitions = next;
    }

    let k = projection.rows();
    let mut lower = vec![vec![f64::NEG_INFINITY; partitions.len()]; k];
    let mut upper = vec![vec![f64::INFINITY; partitions.len()]; k];
    let mut children = Vec::with_capacity(partitions.len());

    ftlog::debug!("LPT split into {} partitions under {k} projection rows", partitions.len());

    for (j, partition) in partitions.iter().enumerate() {
        if !partition.is_empty() {
            for (i, row) in projection.matrix.iter().enumerate() {
                let values = partition
                    .iter()
                    .map(|&x| project(row, &pivots, x, objects, distance))
                    .collect::<Result<Vec<_>, _>>()?;
                lower[i][j] = values.iter().copied().fold(f64::INFINITY, f64::min);
                upper[i][j] = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            }
        }
        let child = build(partition, objects, distance, selector, max_leaf_size, k_leaf, projection)?;
        children.push(child.map(Box::new));
    }

    Ok(Some(Node::Internal { pivots, children, lower, upper }))
}

/// Computes a row's projection value and Lipschitz `L1` margin coefficient
/// against already-cached pivot distances `d_qp`.
#[allow(clippy::cast_precision_loss)]
fn row_projection(row: &[i64], d_qp: &[f64]) -> (f64, f64) {
    let val = row.iter().zip(d_qp).map(|(&coeff, &d)| coeff as f64 * d).sum();
    let l1_norm = row.iter().map(|&c| (c as f64).abs()).sum();
    (val, l1_norm)
}

/// Answers a range query against an LPT rooted at `node`.
///
/// For each projection row `i`, computes the query's projection `Phi_i(q)`
/// and a Lipschitz safety margin `mu_i = r * sum_l |A[i][l]|`, then prunes a
/// child iff some row's projection interval cannot overlap the query ball.
/// This is the single-pass version of the search (see Open Question 2): the
/// projections and margins are each computed exactly once per query.
///
/// # Errors
///
/// Propagates an [`Error`] from a failed distance evaluation.
pub fn search(node: &Node, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64, projection: &Projection) -> Result<(Vec<usize>, usize), Error> {
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

    let mut q_proj = Vec::with_capacity(projection.matrix.len());
    let mut margins = Vec::with_capacity(projection.matrix.len());
    for row in &projection.matrix {
        let (val, l1_norm) = row_projection(row, &d_qp);
        q_proj.push(val);
        margins.push(l1_norm * r);
    }

    for (j, child) in children.iter().enumerate() {
        let Some(child) = child else { continue };

        let pruned = (0..projection.matrix.len()).any(|i| q_proj[i] + margins[i] < lower[i][j] || q_proj[i] - margins[i] > upper[i][j]);
        if pruned {
            continue;
        }

        let (child_hits, child_count) = search(child, q, objects, distance, r, projection)?;
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

    fn diagonal_projection() -> Projection {
        Projection { matrix: vec![vec![1, -1], vec![1, 1]], regions: 2 }
    }

    #[test]
    fn builds_and_searches_small_tree() {
        let objects: Vec<Object> = (0..30).map(|i| Object::Vector(vec![f64::from(i)])).collect();
        let data: Vec<usize> = (0..30).collect();
        let distance = crate::Minkowski { order: MinkowskiOrder::Euclidean };
        let mut selector = Random::new(13);
        let projection = diagonal_projection();

        let root = build(&data, &objects, &distance, &mut selector, 2, 1, &projection).unwrap().unwrap();
        let q = Object::Vector(vec![15.0]);
        let (hits, count) = search(&root, &q, &objects, &distance, 3.0, &projection).unwrap();

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
