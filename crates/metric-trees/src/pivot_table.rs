//! The Pivot Table leaf structure and its range-search algorithm.

use crate::selectors::PivotSelector;
use crate::{Distance, Error, Object};

/// A flat leaf structure caching object-to-pivot distances.
///
/// Holds its own `pivots` and the remaining stored `data` (both as dataset
/// indices), plus the materialized distance matrix `distances[i][j] =
/// d(pivots[i], data[j])`. `data.len()` never exceeds `max_leaf_size`.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pivots: Vec<usize>,
    data: Vec<usize>,
    distances: Vec<Vec<f64>>,
    max_leaf_size: usize,
    k_leaf: usize,
}

impl PivotTable {
    /// Builds a `PivotTable` over `data`, selecting `k_leaf` pivots via
    /// `selector` and caching `d(pivot, point)` for every remaining point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OversizedLeaf`] if more than `max_leaf_size` points
    /// remain after pivot selection, or propagates a [`Error`] from a failed
    /// distance evaluation.
    pub fn build(
        data: &[usize],
        objects: &[Object],
        distance: &dyn Distance,
        selector: &mut dyn PivotSelector,
        max_leaf_size: usize,
        k_leaf: usize,
    ) -> Result<Self, Error> {
        let (pivots, data) = selector.select(data, objects, distance, k_leaf)?;

        if data.len() > max_leaf_size {
            return Err(Error::OversizedLeaf { actual: data.len(), max: max_leaf_size });
        }

        let distances = pivots
            .iter()
            .map(|&p| data.iter().map(|&x| distance.eval(&objects[p], &objects[x])).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        ftlog::trace!("built pivot table leaf with {} pivots and {} points", pivots.len(), data.len());

        Ok(Self { pivots, data, distances, max_leaf_size, k_leaf })
    }

    /// The pivots this leaf owns.
    #[must_use]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// The non-pivot points this leaf stores.
    #[must_use]
    pub fn data(&self) -> &[usize] {
        &self.data
    }

    /// The configured maximum number of stored (non-pivot) points.
    #[must_use]
    pub const fn max_leaf_size(&self) -> usize {
        self.max_leaf_size
    }

    /// The configured number of pivots for this leaf.
    #[must_use]
    pub const fn k_leaf(&self) -> usize {
        self.k_leaf
    }

    /// Every object this leaf owns, pivots first then stored data, matching
    /// the DFS hit order of the tree searches that contain it.
    pub fn all_objects(&self) -> impl Iterator<Item = usize> + '_ {
        self.pivots.iter().chain(self.data.iter()).copied()
    }

    /// Answers a range query against this leaf.
    ///
    /// Evaluates `d(q, pivot)` for every pivot (recording hits), then for
    /// each stored point applies the triangle-inequality inclusion and
    /// exclusion rules against the cached pivot distances before falling
    /// back to a direct distance evaluation. `count` increments only on
    /// actual calls to `distance`, never on cache lookups.
    ///
    /// # Errors
    ///
    /// Propagates an [`Error`] from a failed distance evaluation.
    pub fn search(&self, q: &Object, objects: &[Object], distance: &dyn Distance, r: f64) -> Result<(Vec<usize>, usize), Error> {
        let mut hits = Vec::new();
        let mut count = 0_usize;

        let mut pivot_dists = Vec::with_capacity(self.pivots.len());
        for &p in &self.pivots {
            let d = distance.eval(q, &objects[p])?;
            count += 1;
            pivot_dists.push(d);
            if d <= r {
                hits.push(p);
            }
        }

        'points: for (j, &x) in self.data.iter().enumerate() {
            for (i, &d_qp) in pivot_dists.iter().enumerate() {
                let d_px = self.distances[i][j];
                if d_qp + d_px <= r {
                    hits.push(x);
                    continue 'points;
                }
                if (d_qp - d_px).abs() > r {
                    continue 'points;
                }
            }
            let d = distance.eval(&objects[x], q)?;
            count += 1;
            if d <= r {
                hits.push(x);
            }
        }

        Ok((hits, count))
    }
}
